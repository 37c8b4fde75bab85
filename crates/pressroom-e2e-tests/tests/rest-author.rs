use pressroom_dal::author::Author;
use pressroom_e2e_tests::{extend_url, launch_authors, now, rest::create_author};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_author_crud() {
    let (base_url, _guard) = launch_authors("test_author_crud").await.unwrap();
    let client = reqwest::Client::new();
    let api_url = base_url.join("authors").unwrap();

    let author = create_author(&client, &base_url, "Gabriel", "Garcia", "g@example.com")
        .await
        .unwrap();
    info!("Created author: {:#?}", author);

    assert_eq!(author.first_name, "Gabriel");
    assert_eq!(author.email, "g@example.com");
    let time_diff = now() - author.created_at;
    assert!(time::Duration::seconds(5) > time_diff);

    let record_url = extend_url(&api_url, author.id);

    let response = client.get(record_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let rec: Author = response.json().await.unwrap();
    assert_eq!(rec.last_name, "Garcia");

    // duplicate email is rejected and nothing is added
    let duplicate = json!({"firstName": "Other", "lastName": "Writer", "email": "g@example.com"});
    let response = client
        .post(api_url.clone())
        .json(&duplicate)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client.get(api_url.clone()).send().await.unwrap();
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["meta"]["total"], 1);

    // partial update leaves other fields untouched
    let patch = json!({"biography": "Wrote magical realism"});
    let response = client
        .patch(record_url.clone())
        .json(&patch)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let rec: Author = response.json().await.unwrap();
    assert_eq!(rec.first_name, "Gabriel");
    assert_eq!(rec.email, "g@example.com");
    assert_eq!(rec.biography, Some("Wrote magical realism".into()));
    assert!(rec.updated_at >= rec.created_at);

    // updating to a taken email is rejected
    let second = create_author(&client, &base_url, "Julio", "Cortazar", "j@example.com")
        .await
        .unwrap();
    let second_url = extend_url(&api_url, second.id);
    let patch = json!({"email": "g@example.com"});
    let response = client
        .patch(second_url.clone())
        .json(&patch)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // unknown ids map to 404
    let missing_url = extend_url(&api_url, 999_999);
    let response = client
        .patch(missing_url.clone())
        .json(&json!({"biography": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client.delete(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client.get(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client.delete(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_author_validation() {
    let (base_url, _guard) = launch_authors("test_author_validation").await.unwrap();
    let client = reqwest::Client::new();
    let api_url = base_url.join("authors").unwrap();

    // missing email
    let payload = json!({"firstName": "Gabriel", "lastName": "Garcia"});
    let response = client
        .post(api_url.clone())
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // empty first name
    let payload = json!({"firstName": "", "lastName": "Garcia", "email": "g@example.com"});
    let response = client
        .post(api_url.clone())
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    // malformed email
    let payload = json!({"firstName": "Gabriel", "lastName": "Garcia", "email": "not-an-email"});
    let response = client
        .post(api_url.clone())
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
#[traced_test]
async fn test_author_paging() {
    let (base_url, _guard) = launch_authors("test_author_paging").await.unwrap();
    let client = reqwest::Client::new();
    let api_url = base_url.join("authors").unwrap();

    for i in 1..=25 {
        create_author(
            &client,
            &base_url,
            "Author",
            &format!("Number{i}"),
            &format!("a{i}@example.com"),
        )
        .await
        .unwrap();
    }

    let response = client
        .get(api_url.clone())
        .query(&[("page", 2), ("limit", 10)])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["meta"]["page"], 2);
    assert_eq!(listing["meta"]["limit"], 10);
    assert_eq!(listing["meta"]["total"], 25);
    assert_eq!(listing["meta"]["totalPages"], 3);
    let data = listing["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    // newest first - second page holds the 11th to 20th most recent
    assert_eq!(data[0]["id"], 15);
    assert_eq!(data[9]["id"], 6);

    // defaults apply when paging params are missing
    let response = client.get(api_url.clone()).send().await.unwrap();
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["meta"]["page"], 1);
    assert_eq!(listing["meta"]["limit"], 10);
    assert_eq!(listing["data"].as_array().unwrap().len(), 10);

    // invalid values fall back, oversized limits are clamped
    let response = client
        .get(api_url.clone())
        .query(&[("page", 0), ("limit", -3)])
        .send()
        .await
        .unwrap();
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["meta"]["page"], 1);
    assert_eq!(listing["meta"]["limit"], 10);

    let response = client
        .get(api_url.clone())
        .query(&[("limit", 1000)])
        .send()
        .await
        .unwrap();
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["meta"]["limit"], 100);
    assert_eq!(listing["data"].as_array().unwrap().len(), 25);
}
