//! hospital-locator CLI entry point
//!
//! Nearby hospital search - CLI + JSON API

use hospital_locator::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
