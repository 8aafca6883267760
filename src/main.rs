//! Bariatric Food Scorer (bariscore)
//!
//! An MCP server that scores foods and recipes for post-bariatric-surgery diets.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bariscore::build_info;
use bariscore::mcp::BariscoreService;
use bariscore::models::SurgeryType;

/// Get the default surgery type from the environment, if configured
fn get_default_surgery() -> Option<String> {
    std::env::var("BARISCORE_DEFAULT_SURGERY")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bariscore=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let default_surgery = get_default_surgery();
    eprintln!(
        "Default surgery type: {}",
        SurgeryType::resolve(default_surgery.as_deref()).as_str()
    );

    let service = BariscoreService::new(default_surgery);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
