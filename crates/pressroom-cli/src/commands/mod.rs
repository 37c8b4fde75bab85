pub mod author;
pub mod publication;

use clap::Args;
use url::Url;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self) -> anyhow::Result<()>;
}

#[derive(Args, Debug, Clone)]
pub struct Services {
    #[arg(
        long,
        env = "PRESSROOM_AUTHORS_URL",
        default_value = "http://localhost:3001",
        help = "Base URL of the authors service"
    )]
    pub authors_url: Url,

    #[arg(
        long,
        env = "PRESSROOM_PUBLICATIONS_URL",
        default_value = "http://localhost:3002",
        help = "Base URL of the publications service"
    )]
    pub publications_url: Url,
}

pub(crate) fn extend_url(base: &Url, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Invalid base URL: {base}"))?
        .extend(segments);
    Ok(url)
}

/// Turns an error response into a readable failure, preferring the service's
/// own message body.
pub(crate) async fn fail_on_error(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| status.to_string());
    anyhow::bail!("Request failed ({status}): {message}")
}
