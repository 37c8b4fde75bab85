use clap::{Parser, Subcommand};
use pressroom_dal::author::Author;
use pressroom_dal::publication::{EditorialStatus, Publication};
use serde_json::json;
use tracing::warn;

use crate::commands::{Executor, Services, extend_url, fail_on_error};

#[derive(Parser, Debug)]
pub struct PublicationCmd {
    #[command(flatten)]
    services: Services,
    #[command(subcommand)]
    action: PublicationAction,
}

#[derive(Subcommand, Debug)]
enum PublicationAction {
    #[command(about = "List publications, paginated")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    #[command(about = "Show one publication together with its author")]
    Show { id: i64 },
    #[command(about = "Create a new publication, the author id is validated remotely")]
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author_id: i64,
        #[arg(long)]
        content: Option<String>,
    },
    #[command(about = "Change the editorial status of a publication")]
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_status, help = "One of DRAFT, INREVIEW, APPROVED, PUBLISHED, REJECTED")]
        status: EditorialStatus,
    },
}

fn parse_status(value: &str) -> Result<EditorialStatus, String> {
    serde_json::from_value(serde_json::Value::String(value.to_uppercase()))
        .map_err(|_| format!("unknown status: {value}"))
}

impl Executor for PublicationCmd {
    async fn run(self) -> anyhow::Result<()> {
        let client = reqwest::Client::new();
        let base = &self.services.publications_url;
        match self.action {
            PublicationAction::List { page, limit } => {
                let url = extend_url(base, &["api", "Publications"])?;
                let response = client
                    .get(url)
                    .query(&[("page", page), ("limit", limit)])
                    .send()
                    .await?;
                let publications: Vec<Publication> =
                    fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&publications)?);
            }
            PublicationAction::Show { id } => {
                let url = extend_url(base, &["api", "Publications", &id.to_string()])?;
                let response = client.get(url).send().await?;
                let publication: Publication = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&publication)?);

                // composed view - author fetch failure degrades to the bare publication
                match fetch_author(&client, &self.services, publication.author_id).await {
                    Ok(author) => {
                        println!("Author: {} {} <{}>", author.first_name, author.last_name, author.email);
                    }
                    Err(e) => warn!("Could not fetch author {}: {e}", publication.author_id),
                }
            }
            PublicationAction::Create {
                title,
                author_id,
                content,
            } => {
                let url = extend_url(base, &["api", "Publications"])?;
                let payload = json!({
                    "title": title,
                    "authorId": author_id,
                    "content": content,
                });
                let response = client.post(url).json(&payload).send().await?;
                let publication: Publication = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&publication)?);
            }
            PublicationAction::SetStatus { id, status } => {
                let url = extend_url(base, &["api", "Publications", &id.to_string(), "status"])?;
                let payload = json!({ "status": status });
                let response = client.patch(url).json(&payload).send().await?;
                let publication: Publication = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&publication)?);
            }
        }
        Ok(())
    }
}

async fn fetch_author(
    client: &reqwest::Client,
    services: &Services,
    author_id: i64,
) -> anyhow::Result<Author> {
    let url = extend_url(&services.authors_url, &["authors", &author_id.to_string()])?;
    let response = client.get(url).send().await?;
    let author = fail_on_error(response).await?.json().await?;
    Ok(author)
}
