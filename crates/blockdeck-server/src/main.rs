use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "blockdeck_server=debug,info".into());

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = blockdeck_server::run().await {
        error!("Server failed: {e:#}");
        std::process::exit(1);
    }
}
