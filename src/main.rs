use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdoutはMCPトランスポートが使うため、ログはstderrへ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("catalog_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("book-catalog.json"));

    catalog_mcp::interface::mcp::run(catalog_path).await
}
