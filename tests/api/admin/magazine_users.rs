use crate::helpers::spawn_app;
use magazine_api::models::{MagazineUserAPI, MagazineUserForm, Page};
use magazine_api::utils::{Envelope, ResponseErrorMessage, ResponseMessage};
use sqlx::Row;
use uuid::Uuid;

#[tokio::test]
async fn unauthenticated_user_cannot_manage_magazine_users() {
    let app = spawn_app().await;
    let id = app
        .create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;
    let body = serde_json::json!({"name": "octavia", "email": "octavia_butler@gmail.com"});

    let responses = vec![
        app.get_admin_magazine_users(None).await,
        app.post_admin_magazine_user(&body).await,
        app.get_admin_magazine_user(&id).await,
        app.get_admin_edit_magazine_user(&id).await,
        app.put_admin_magazine_user(&id, &body).await,
        app.delete_admin_magazine_user(&id).await,
        app.get_admin_stats(None).await,
    ];

    for response in responses {
        assert_eq!(401, response.status().as_u16());
        let response_body: ResponseErrorMessage = response.json().await.unwrap();
        assert_eq!("Authentication required.", response_body.error);
    }
}

#[tokio::test]
async fn admin_lists_magazine_users_most_recent_first() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;
    app.create_magazine_user("octavia", "octavia_butler@gmail.com", None)
        .await;

    let response = app.get_admin_magazine_users(None).await;

    assert_eq!(200, response.status().as_u16());
    let page: Page<MagazineUserAPI> = response.json().await.unwrap();
    assert_eq!(1, page.current_page);
    assert_eq!(20, page.per_page);
    assert_eq!(2, page.total);
    assert_eq!(1, page.last_page);
    let emails: Vec<&str> = page.data.iter().map(|user| user.email.as_str()).collect();
    assert_eq!(
        vec!["octavia_butler@gmail.com", "ursula_le_guin@gmail.com"],
        emails
    );
}

#[tokio::test]
async fn admin_listing_is_paginated_by_twenty() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    for i in 0..21 {
        app.create_magazine_user(&format!("reader {}", i), &format!("reader{}@gmail.com", i), None)
            .await;
    }

    let first: Page<MagazineUserAPI> = app
        .get_admin_magazine_users(None)
        .await
        .json()
        .await
        .unwrap();
    let second: Page<MagazineUserAPI> = app
        .get_admin_magazine_users(Some(2))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(20, first.data.len());
    assert_eq!(21, first.total);
    assert_eq!(2, first.last_page);
    assert_eq!(2, second.current_page);
    assert_eq!(1, second.data.len());
    assert!(first.data.iter().all(|user| user.id != second.data[0].id));
}

#[tokio::test]
async fn admin_listing_far_past_the_last_page_is_empty() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;

    for page in [3, i64::MAX] {
        let response = app.get_admin_magazine_users(Some(page)).await;

        assert_eq!(200, response.status().as_u16());
        let listing: Page<MagazineUserAPI> = response.json().await.unwrap();
        assert_eq!(page, listing.current_page);
        assert_eq!(1, listing.total);
        assert!(listing.data.is_empty());
    }
}

#[tokio::test]
async fn admin_listing_exposes_attribution_shortcuts() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_magazine_user(
        &serde_json::json!({
            "name": "le guin",
            "email": "ursula_le_guin@gmail.com",
            "source_data": {"embed_type": "javascript"}
        }),
        Some("https://blog.example.com/posts/42"),
    )
    .await;

    let page: Page<MagazineUserAPI> = app
        .get_admin_magazine_users(None)
        .await
        .json()
        .await
        .unwrap();

    let user = &page.data[0];
    assert_eq!(Some("blog.example.com"), user.source_website.as_deref());
    assert_eq!(
        Some("https://blog.example.com/posts/42"),
        user.source_url.as_deref()
    );
    assert_eq!(Some("javascript"), user.embed_type.as_deref());
}

#[tokio::test]
async fn admin_can_create_a_magazine_user_without_source_data() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app
        .post_admin_magazine_user(
            &serde_json::json!({"name": "le guin", "email": "ursula_le_guin@gmail.com"}),
        )
        .await;

    assert_eq!(201, response.status().as_u16());
    let created: MagazineUserAPI = response.json().await.unwrap();
    assert_eq!("le guin", created.name);
    assert_eq!("ursula_le_guin@gmail.com", created.email);
    assert!(created.source_data.is_none());
    assert!(created.source_website.is_none());
}

#[tokio::test]
async fn admin_create_rejects_invalid_and_duplicate_emails() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;

    let test_cases = vec![
        serde_json::json!({"name": "le guin", "email": "ursula_le_guin@gmail.com"}),
        serde_json::json!({"name": "le guin", "email": "not-an-email"}),
        serde_json::json!({"name": "le guin"}),
    ];

    for body in test_cases {
        let response = app.post_admin_magazine_user(&body).await;

        assert_eq!(422, response.status().as_u16());
        let envelope: Envelope = response.json().await.unwrap();
        assert!(envelope.errors.unwrap().get("email").is_some());
    }
}

#[tokio::test]
async fn admin_can_show_a_magazine_user() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_magazine_user(
        &serde_json::json!({
            "name": "le guin",
            "email": "ursula_le_guin@gmail.com",
            "source_data": {"embed_type": "iframe", "campaign": "spring"}
        }),
        Some("https://blog.example.com/posts/42"),
    )
    .await
    .error_for_status()
    .unwrap();
    let stored = sqlx::query("SELECT id, source_data FROM magazine_users")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch saved magazine user.");
    let id: Uuid = stored.get("id");
    let stored_source_data: serde_json::Value = stored.get("source_data");

    let response = app.get_admin_magazine_user(&id).await;

    assert_eq!(200, response.status().as_u16());
    let user: MagazineUserAPI = response.json().await.unwrap();
    assert_eq!(id, user.id);
    assert_eq!("le guin", user.name);
    assert_eq!("ursula_le_guin@gmail.com", user.email);
    assert_eq!(
        stored_source_data,
        serde_json::to_value(&user.source_data).unwrap()
    );
    let source_data = user.source_data.unwrap();
    assert_eq!(Some("blog.example.com"), source_data.get("website"));
    assert_eq!(
        Some("https://blog.example.com/posts/42"),
        source_data.get("url")
    );
    assert_eq!(Some("iframe"), source_data.get("embed_type"));
    assert_eq!(Some("spring"), source_data.get("campaign"));
    assert!(source_data.contains_key("timestamp"));
    assert_eq!(Some("iframe"), user.embed_type.as_deref());
}

#[tokio::test]
async fn admin_edit_returns_only_editable_fields() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = app
        .create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;

    let response = app.get_admin_edit_magazine_user(&id).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        serde_json::json!({"id": id, "name": "le guin", "email": "ursula_le_guin@gmail.com"}),
        body
    );
    let _: MagazineUserForm = serde_json::from_value(body).unwrap();
}

#[tokio::test]
async fn unknown_magazine_users_are_not_found() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = Uuid::new_v4();
    let body = serde_json::json!({"name": "le guin", "email": "ursula_le_guin@gmail.com"});

    let responses = vec![
        app.get_admin_magazine_user(&id).await,
        app.get_admin_edit_magazine_user(&id).await,
        app.put_admin_magazine_user(&id, &body).await,
        app.delete_admin_magazine_user(&id).await,
    ];

    for response in responses {
        assert_eq!(404, response.status().as_u16());
    }
}

#[tokio::test]
async fn admin_update_keeps_source_data() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = app
        .create_magazine_user(
            "le guin",
            "ursula_le_guin@gmail.com",
            Some("https://blog.example.com/posts/42"),
        )
        .await;

    let response = app
        .put_admin_magazine_user(
            &id,
            &serde_json::json!({"name": "ursula k. le guin", "email": "ursula@earthsea.org"}),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let updated: MagazineUserAPI = response.json().await.unwrap();
    assert_eq!("ursula k. le guin", updated.name);
    assert_eq!("ursula@earthsea.org", updated.email);
    assert_eq!(Some("blog.example.com"), updated.source_website.as_deref());
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn admin_update_allows_keeping_the_same_email() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = app
        .create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;

    let response = app
        .put_admin_magazine_user(
            &id,
            &serde_json::json!({"name": "ursula k. le guin", "email": "ursula_le_guin@gmail.com"}),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn admin_update_rejects_an_email_owned_by_another_record() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = app
        .create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;
    app.create_magazine_user("octavia", "octavia_butler@gmail.com", None)
        .await;

    let response = app
        .put_admin_magazine_user(
            &id,
            &serde_json::json!({"name": "le guin", "email": "octavia_butler@gmail.com"}),
        )
        .await;

    assert_eq!(422, response.status().as_u16());
    let envelope: Envelope = response.json().await.unwrap();
    assert_eq!(
        serde_json::json!({"email": ["The email has already been taken."]}),
        envelope.errors.unwrap()
    );
}

#[tokio::test]
async fn admin_can_delete_a_magazine_user() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let id = app
        .create_magazine_user("le guin", "ursula_le_guin@gmail.com", None)
        .await;

    let response = app.delete_admin_magazine_user(&id).await;

    assert_eq!(200, response.status().as_u16());
    let response_body: ResponseMessage = response.json().await.unwrap();
    assert_eq!("The magazine user has been deleted.", response_body.message);

    let response = app.get_admin_magazine_user(&id).await;
    assert_eq!(404, response.status().as_u16());
}
