use pressroom_dal::ListingParams;
use pressroom_dal::author::{AuthorRepositoryImpl, CreateAuthor, UpdateAuthor};

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    sqlx::migrate!("../../migrations/authors")
        .run(&conn)
        .await
        .unwrap();
    conn
}

fn new_author(first_name: &str, last_name: &str, email: &str) -> CreateAuthor {
    CreateAuthor {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        biography: None,
        nationality: None,
        birth_date: None,
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    let mut payload = new_author("Gabriel", "Garcia", "g@example.com");
    payload.nationality = Some("Colombian".to_string());
    let created = repo.create(payload).await.unwrap();

    assert_eq!(created.first_name, "Gabriel");
    assert_eq!(created.last_name, "Garcia");
    assert_eq!(created.email, "g@example.com");
    assert_eq!(created.nationality, Some("Colombian".to_string()));
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.first_name, created.first_name);
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    repo.create(new_author("Gabriel", "Garcia", "g@example.com"))
        .await
        .unwrap();
    let before = repo.count().await.unwrap();

    let err = repo
        .create(new_author("Other", "Writer", "g@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        pressroom_dal::Error::EmailAlreadyUsed(ref email) if email == "g@example.com"
    ));
    assert_eq!(repo.count().await.unwrap(), before);
}

#[tokio::test]
async fn test_partial_update_merges_fields() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    let created = repo
        .create(new_author("Gabriel", "Garcia", "g@example.com"))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateAuthor {
                biography: Some("Wrote novels".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Gabriel");
    assert_eq!(updated.email, "g@example.com");
    assert_eq!(updated.biography, Some("Wrote novels".to_string()));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_to_taken_email_rejected() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    repo.create(new_author("Gabriel", "Garcia", "g@example.com"))
        .await
        .unwrap();
    let second = repo
        .create(new_author("Julio", "Cortazar", "j@example.com"))
        .await
        .unwrap();

    let err = repo
        .update(
            second.id,
            UpdateAuthor {
                email: Some("g@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, pressroom_dal::Error::EmailAlreadyUsed(_)));
}

#[tokio::test]
async fn test_delete() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    let created = repo
        .create(new_author("Gabriel", "Garcia", "g@example.com"))
        .await
        .unwrap();

    repo.delete(created.id).await.unwrap();

    let err = repo.get(created.id).await.unwrap_err();
    assert!(matches!(err, pressroom_dal::Error::RecordNotFound(_)));

    let err = repo.delete(created.id).await.unwrap_err();
    assert!(matches!(err, pressroom_dal::Error::RecordNotFound(_)));
}

#[tokio::test]
async fn test_listing_pages_newest_first() {
    let conn = init_db().await;
    let repo = AuthorRepositoryImpl::new(conn);

    for i in 1..=25 {
        repo.create(new_author(
            "Author",
            &format!("Number{i}"),
            &format!("a{i}@example.com"),
        ))
        .await
        .unwrap();
    }

    let batch = repo.list(ListingParams::new(10, 10)).await.unwrap();
    assert_eq!(batch.total, 25);
    assert_eq!(batch.rows.len(), 10);
    // second page of newest-first: ids 15 down to 6
    assert_eq!(batch.rows[0].id, 15);
    assert_eq!(batch.rows[9].id, 6);
    for window in batch.rows.windows(2) {
        assert!(window[0].created_at >= window[1].created_at);
    }
}
