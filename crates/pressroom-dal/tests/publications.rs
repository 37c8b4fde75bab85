use pressroom_dal::ListingParams;
use pressroom_dal::publication::{CreatePublication, EditorialStatus, PublicationRepositoryImpl};

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    sqlx::migrate!("../../migrations/publications")
        .run(&conn)
        .await
        .unwrap();
    conn
}

fn new_publication(title: &str, author_id: i64) -> CreatePublication {
    CreatePublication {
        title: title.to_string(),
        author_id,
        content: None,
    }
}

#[tokio::test]
async fn test_create_starts_as_draft() {
    let conn = init_db().await;
    let repo = PublicationRepositoryImpl::new(conn);

    let created = repo
        .create(new_publication("Cien anos de soledad", 1))
        .await
        .unwrap();

    assert_eq!(created.status, EditorialStatus::Draft);
    assert_eq!(created.author_id, 1);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.title, "Cien anos de soledad");
    assert_eq!(fetched.status, EditorialStatus::Draft);
}

#[tokio::test]
async fn test_change_status_accepts_any_value() {
    let conn = init_db().await;
    let repo = PublicationRepositoryImpl::new(conn);

    let created = repo.create(new_publication("Rayuela", 2)).await.unwrap();

    // no transition table - every status is reachable from every other,
    // including backwards out of terminal states
    for status in [
        EditorialStatus::InReview,
        EditorialStatus::Approved,
        EditorialStatus::Published,
        EditorialStatus::Draft,
        EditorialStatus::Rejected,
    ] {
        let updated = repo.change_status(created.id, status).await.unwrap();
        assert_eq!(updated.status, status);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }
}

#[tokio::test]
async fn test_change_status_unknown_id() {
    let conn = init_db().await;
    let repo = PublicationRepositoryImpl::new(conn);

    let err = repo
        .change_status(999_999, EditorialStatus::Published)
        .await
        .unwrap_err();
    assert!(matches!(err, pressroom_dal::Error::RecordNotFound(_)));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_listing_pages_newest_first() {
    let conn = init_db().await;
    let repo = PublicationRepositoryImpl::new(conn);

    for i in 1..=25 {
        repo.create(new_publication(&format!("Title {i}"), i))
            .await
            .unwrap();
    }

    let rows = repo.list(ListingParams::new(10, 10)).await.unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].id, 15);
    assert_eq!(rows[9].id, 6);
    for window in rows.windows(2) {
        assert!(window[0].created_at >= window[1].created_at);
    }
}
