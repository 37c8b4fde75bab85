use pressroom_server::{Result, config::AuthorsServerConfig, run::run_authors};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = AuthorsServerConfig::load()?;
    run_authors(args).await
}
