//! Comment export example
//!
//! This example demonstrates the core functionality of flatfetch:
//! - Configuring the API endpoint and retry policy
//! - Running the full users → posts → comments pipeline
//! - Writing the flattened rows to a CSV file
//!
//! A fatal failure (the user listing itself cannot be fetched) propagates as
//! an `Err` from `main`, giving the process a non-zero exit status.

use flatfetch::{Config, RetryConfig, run_to_csv};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration
    let config = Config {
        base_url: "https://jsonplaceholder.typicode.com".to_string(),
        posts_per_user: 5,
        comments_per_post: 3,
        request_timeout: Duration::from_secs(10),
        retry: RetryConfig {
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        },
    };

    // Fetch, flatten, and persist
    let rows = run_to_csv(&config, "comments_report.csv".as_ref()).await?;

    if rows == 0 {
        println!("⚠ No rows produced (nothing matched the filters)");
    } else {
        println!("✓ Wrote {rows} rows to comments_report.csv");
    }

    Ok(())
}
