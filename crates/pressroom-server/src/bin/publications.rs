use pressroom_server::{Result, config::PublicationsServerConfig, run::run_publications};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = PublicationsServerConfig::load()?;
    run_publications(args).await
}
