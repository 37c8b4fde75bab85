use clap::{Parser, Subcommand};
use pressroom_dal::author::Author;
use serde_json::json;

use crate::commands::{Executor, Services, extend_url, fail_on_error};

#[derive(Parser, Debug)]
pub struct AuthorCmd {
    #[command(flatten)]
    services: Services,
    #[command(subcommand)]
    action: AuthorAction,
}

#[derive(Subcommand, Debug)]
enum AuthorAction {
    #[command(about = "List authors, paginated")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    #[command(about = "Show one author")]
    Show { id: i64 },
    #[command(about = "Create a new author")]
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        biography: Option<String>,
        #[arg(long)]
        nationality: Option<String>,
        #[arg(long, help = "Birth date as YYYY-MM-DD")]
        birth_date: Option<String>,
    },
    #[command(about = "Update an author, only the given fields change")]
    Update {
        id: i64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        biography: Option<String>,
        #[arg(long)]
        nationality: Option<String>,
        #[arg(long, help = "Birth date as YYYY-MM-DD")]
        birth_date: Option<String>,
    },
    #[command(about = "Delete an author")]
    Delete { id: i64 },
}

/// Absent fields are left out of the payload so the service keeps their
/// current values.
fn update_payload(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    biography: Option<String>,
    nationality: Option<String>,
    birth_date: Option<String>,
) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    let fields = [
        ("firstName", first_name),
        ("lastName", last_name),
        ("email", email),
        ("biography", biography),
        ("nationality", nationality),
        ("birthDate", birth_date),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            payload.insert(key.to_string(), serde_json::Value::String(value));
        }
    }
    serde_json::Value::Object(payload)
}

impl Executor for AuthorCmd {
    async fn run(self) -> anyhow::Result<()> {
        let client = reqwest::Client::new();
        let base = &self.services.authors_url;
        match self.action {
            AuthorAction::List { page, limit } => {
                let url = extend_url(base, &["authors"])?;
                let response = client
                    .get(url)
                    .query(&[("page", page), ("limit", limit)])
                    .send()
                    .await?;
                let page: serde_json::Value = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&page)?);
            }
            AuthorAction::Show { id } => {
                let url = extend_url(base, &["authors", &id.to_string()])?;
                let response = client.get(url).send().await?;
                let author: Author = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&author)?);
            }
            AuthorAction::Create {
                first_name,
                last_name,
                email,
                biography,
                nationality,
                birth_date,
            } => {
                let url = extend_url(base, &["authors"])?;
                let payload = json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "email": email,
                    "biography": biography,
                    "nationality": nationality,
                    "birthDate": birth_date,
                });
                let response = client.post(url).json(&payload).send().await?;
                let author: Author = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&author)?);
            }
            AuthorAction::Update {
                id,
                first_name,
                last_name,
                email,
                biography,
                nationality,
                birth_date,
            } => {
                let url = extend_url(base, &["authors", &id.to_string()])?;
                let payload = update_payload(
                    first_name,
                    last_name,
                    email,
                    biography,
                    nationality,
                    birth_date,
                );
                let response = client.patch(url).json(&payload).send().await?;
                let author: Author = fail_on_error(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&author)?);
            }
            AuthorAction::Delete { id } => {
                let url = extend_url(base, &["authors", &id.to_string()])?;
                let response = client.delete(url).send().await?;
                fail_on_error(response).await?;
                println!("Deleted author {id}");
            }
        }
        Ok(())
    }
}
