//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/   Gateway
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, cache_backend: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/booking", addr);
    info!("Staff:     http://{}/api/staff/{{email}}", addr);
    info!("Health:    http://{}/api/health", addr);
    info!("Cache:     {}", cache_backend);
    info!("{}", separator);
}
