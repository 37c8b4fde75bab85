use anyhow::Result;
use pressroom_dal::author::Author;
use pressroom_dal::publication::Publication;
use reqwest::Url;
use serde_json::json;

pub async fn create_author(
    client: &reqwest::Client,
    base_url: &Url,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<Author> {
    let payload = json!({"firstName": first_name, "lastName": last_name, "email": email});
    let api_url = base_url.join("authors").unwrap();

    let response = client.post(api_url.clone()).json(&payload).send().await?;
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 201);

    let new_author: Author = response.json().await?;

    Ok(new_author)
}

pub async fn create_publication(
    client: &reqwest::Client,
    base_url: &Url,
    title: &str,
    author_id: i64,
) -> Result<Publication> {
    let payload = json!({"title": title, "authorId": author_id});
    let api_url = base_url.join("api/Publications").unwrap();

    let response = client.post(api_url.clone()).json(&payload).send().await?;
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 201);

    let new_publication: Publication = response.json().await?;

    Ok(new_publication)
}
