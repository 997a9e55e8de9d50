use crate::helpers::spawn_app;
use magazine_api::models::{SourceCount, SourceStats};

fn count(label: &str, total: i64) -> SourceCount {
    SourceCount {
        label: label.to_string(),
        total,
    }
}

// Ties are ordered by the database collation, so compare them as a set.
fn sorted(mut counts: Vec<SourceCount>) -> Vec<SourceCount> {
    counts.sort_by(|a, b| a.label.cmp(&b.label));
    counts
}

#[tokio::test]
async fn stats_group_subscriptions_by_source() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    for (i, (referer, embed_type)) in [
        ("https://blog.example.com/a", Some("iframe")),
        ("https://blog.example.com/b", Some("javascript")),
        ("https://news.example.org/", Some("iframe")),
    ]
    .into_iter()
    .enumerate()
    {
        let mut body = serde_json::json!({
            "name": format!("reader {}", i),
            "email": format!("reader{}@gmail.com", i),
        });
        if let Some(embed_type) = embed_type {
            body["source_data"] = serde_json::json!({"embed_type": embed_type});
        }
        app.post_magazine_user(&body, Some(referer))
            .await
            .error_for_status()
            .unwrap();
    }
    app.post_magazine_user(
        &serde_json::json!({"name": "walk-in", "email": "walk-in@gmail.com"}),
        None,
    )
    .await
    .error_for_status()
    .unwrap();

    let response = app.get_admin_stats(None).await;

    assert_eq!(200, response.status().as_u16());
    let stats: SourceStats = response.json().await.unwrap();
    assert_eq!(30, stats.recent_days);
    assert_eq!(count("blog.example.com", 2), stats.websites[0]);
    assert_eq!(
        vec![count("Unknown", 1), count("news.example.org", 1)],
        sorted(stats.websites[1..].to_vec())
    );
    assert_eq!(count("iframe", 2), stats.embed_types[0]);
    assert_eq!(
        vec![count("Manual", 1), count("javascript", 1)],
        sorted(stats.embed_types[1..].to_vec())
    );
    assert_eq!(stats.websites, stats.recent_websites);
}

#[tokio::test]
async fn stats_exclude_manually_created_records() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_admin_magazine_user(
        &serde_json::json!({"name": "le guin", "email": "ursula_le_guin@gmail.com"}),
    )
    .await;

    let stats: SourceStats = app.get_admin_stats(Some(7)).await.json().await.unwrap();

    assert_eq!(7, stats.recent_days);
    assert!(stats.websites.is_empty());
    assert!(stats.embed_types.is_empty());
}

#[tokio::test]
async fn stats_reject_a_non_positive_window() {
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    let response = app.get_admin_stats(Some(0)).await;

    assert_eq!(400, response.status().as_u16());
}
