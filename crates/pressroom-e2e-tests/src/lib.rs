pub mod rest;

use std::time::Duration;

use anyhow::{Result, anyhow};
use pressroom_server::config::{AuthorsServerConfig, Parser as _, PublicationsServerConfig};
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tokio::task::JoinHandle;

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, std::time::Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct EnvGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
    server: JoinHandle<()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub async fn launch_authors(test_name: &str) -> Result<(Url, EnvGuard)> {
    let data_dir = TempDir::with_prefix(format!("{test_name}_authors_"))?;
    let db_url = format!("sqlite://{}", data_dir.path().join("authors.db").display());
    let port = random_port()?;
    let args = [
        "pressroom-e2e-tests",
        "--port",
        &port.to_string(),
        "--database-url",
        &db_url,
    ];
    let config = AuthorsServerConfig::try_parse_from(args)?;
    let state = pressroom_server::run::build_authors_state(&config).await?;

    let server = tokio::spawn(async move {
        let shutdown = std::future::pending::<()>();
        if let Err(e) = pressroom_server::run::run_authors_graceful(config, state, shutdown).await {
            tracing::error!("Authors server failed: {e}");
        }
    });

    let base_url = Url::parse(&format!("http://localhost:{port}"))?;
    wait_ready(&base_url).await?;
    Ok((base_url, EnvGuard { data_dir, server }))
}

pub async fn launch_publications(test_name: &str, authors_url: &Url) -> Result<(Url, EnvGuard)> {
    let data_dir = TempDir::with_prefix(format!("{test_name}_publications_"))?;
    let db_url = format!(
        "sqlite://{}",
        data_dir.path().join("publications.db").display()
    );
    let port = random_port()?;
    let args = [
        "pressroom-e2e-tests",
        "--port",
        &port.to_string(),
        "--database-url",
        &db_url,
        "--authors-url",
        authors_url.as_str(),
        "--authors-timeout",
        "2s",
    ];
    let config = PublicationsServerConfig::try_parse_from(args)?;
    let state = pressroom_server::run::build_publications_state(&config).await?;

    let server = tokio::spawn(async move {
        let shutdown = std::future::pending::<()>();
        if let Err(e) =
            pressroom_server::run::run_publications_graceful(config, state, shutdown).await
        {
            tracing::error!("Publications server failed: {e}");
        }
    });

    let base_url = Url::parse(&format!("http://localhost:{port}"))?;
    wait_ready(&base_url).await?;
    Ok((base_url, EnvGuard { data_dir, server }))
}

async fn wait_ready(base_url: &Url) -> Result<()> {
    let client = reqwest::Client::new();
    let health_url = base_url.join("health")?;
    for _ in 0..50 {
        if let Ok(response) = client.get(health_url.clone()).send().await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    Err(anyhow!("Server at {base_url} did not become ready"))
}

pub fn extend_url(url: &Url, id: impl std::fmt::Display) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("base URL")
        .push(&id.to_string());
    url
}

pub fn now() -> time::PrimitiveDateTime {
    pressroom_dal::now()
}
