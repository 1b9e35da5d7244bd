//! Integration test for the catalog service
//!
//! Exercises the complete flow against a file-backed database: bootstrap,
//! ingestion, engagement mutation, and the trending ranking.

use bookhive_core::catalog::{CatalogService, CreateBookRequest, EngagementOp};
use bookhive_core::config::CatalogConfig;
use bookhive_core::storage::models::{EngagementKind, NewUser};
use bookhive_core::storage::Database;

async fn file_backed_service(dir: &tempfile::TempDir, trending_limit: usize) -> CatalogService {
    let db_path = dir.path().join("catalog.db");
    let db = Database::new(&db_path).await.expect("Failed to create database");
    CatalogService::new(
        db,
        CatalogConfig {
            database_path: Some(db_path),
            trending_limit,
            seed_on_bootstrap: true,
        },
    )
}

#[tokio::test]
async fn test_full_catalog_flow() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let service = file_backed_service(&temp_dir, 10).await;

    // 1. Bootstrap seeds the empty catalog exactly once
    let seeded = service.bootstrap().await.expect("Failed to bootstrap");
    assert!(seeded > 0, "Empty catalog must be seeded");
    assert_eq!(service.bootstrap().await.expect("re-bootstrap"), 0);

    // 2. Ingest a new book; associations come back resolved
    let created = service
        .create_book(CreateBookRequest {
            title: Some("A Wizard of Earthsea".to_string()),
            published_date: Some("1968".to_string()),
            publisher: Some("Parnassus Press".to_string()),
            description: Some("Ged learns the true cost of true names.".to_string()),
            pages: Some(183),
            average_rating: Some(4.0),
            users_rating: None,
            cover: None,
            identifier: Some("ISBN:9780547773742".to_string()),
            author_name: Some("Ursula K. Le Guin".to_string()),
            genre_name: Some("Fantasy".to_string()),
        })
        .await
        .expect("Failed to create book");
    assert_eq!(created.authors(), vec!["Ursula K. Le Guin".to_string()]);

    // 3. Search finds it; a miss is an empty vec
    let hits = service
        .list_books(Some("Earthsea"))
        .await
        .expect("Failed to search");
    assert_eq!(hits.len(), 1);
    assert!(service
        .list_books(Some("Discworld"))
        .await
        .expect("Failed to search")
        .is_empty());

    // 4. Engagement from a handful of users pushes the book up the ranking
    let mut users = Vec::new();
    for i in 0..5 {
        let user = service
            .create_user(NewUser::new(format!("reader{i}"), format!("reader{i}@example.com")))
            .await
            .expect("Failed to create user");
        users.push(user);
    }

    for user in &users {
        service
            .mutate_engagement(
                EngagementKind::Favorite,
                &created.book_id,
                &user.user_id,
                EngagementOp::Add,
            )
            .await
            .expect("Failed to favorite");
    }
    service
        .mutate_engagement(
            EngagementKind::Reading,
            &created.book_id,
            &users[0].user_id,
            EngagementOp::Add,
        )
        .await
        .expect("Failed to mark reading");

    let trending = service.trending().await.expect("Failed to rank");
    assert_eq!(trending[0].book.book_id, created.book_id);
    assert_eq!(trending[0].signals.favorite_count, 5);
    assert_eq!(trending[0].signals.reading_count, 1);

    // 5. Removing the engagement drops it back into the seeded pack
    for user in &users {
        service
            .mutate_engagement(
                EngagementKind::Favorite,
                &created.book_id,
                &user.user_id,
                EngagementOp::Remove,
            )
            .await
            .expect("Failed to unfavorite");
    }
    service
        .mutate_engagement(
            EngagementKind::Reading,
            &created.book_id,
            &users[0].user_id,
            EngagementOp::Remove,
        )
        .await
        .expect("Failed to unmark reading");

    let trending = service.trending().await.expect("Failed to rank");
    assert_ne!(trending[0].book.book_id, created.book_id);
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("catalog.db");

    let book_id = {
        let db = Database::new(&db_path).await.expect("Failed to create database");
        let service = CatalogService::new(db, CatalogConfig::default());
        service.bootstrap().await.expect("Failed to bootstrap");

        let books = service.list_books(None).await.expect("Failed to list");
        let user = service
            .create_user(NewUser::new("keeper".to_string(), "keeper@example.com".to_string()))
            .await
            .expect("Failed to create user");
        service
            .mutate_engagement(
                EngagementKind::Read,
                &books[0].book_id,
                &user.user_id,
                EngagementOp::Add,
            )
            .await
            .expect("Failed to mark read");
        books[0].book_id.clone()
    };

    // Reopen the same file; the edge must still be there
    let db = Database::new(&db_path).await.expect("Failed to reopen database");
    let service = CatalogService::new(db, CatalogConfig::default());
    assert_eq!(service.bootstrap().await.expect("bootstrap"), 0, "Must not re-seed");

    let trending = service.trending().await.expect("Failed to rank");
    let entry = trending
        .iter()
        .find(|e| e.book.book_id == book_id)
        .expect("Book missing from ranking");
    assert_eq!(entry.signals.read_count, 1);
}
