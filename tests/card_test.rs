//! Integration tests for fetching and rendering cards.

mod common;

use serde_json::{json, Value};

use common::{
    mock_backend, mount_json, post_json, renderer, request_json, select_inner, select_text,
};
use yells_client::components::format_timestamp;
use yells_client::dom::{ids, Page};
use yells_client::model::{ContentKind, ItemRef, Lookup, Namespace};

#[tokio::test]
async fn test_post_card_has_one_filename_and_code_body() {
    let server = mock_backend().await;
    let post = post_json(7);
    mount_json(&server, "/api/post/7", post.clone()).await;

    let card = renderer(&server)
        .load_card(Namespace::Kind(ContentKind::Post), ItemRef::Id(7))
        .await
        .unwrap()
        .found()
        .unwrap()
        .into_string();

    assert_eq!(select_text(&card, ".card-filename"), ["main.rs"]);
    assert_eq!(
        select_inner(&card, ".code-content"),
        [post["post_code"].as_str().unwrap()]
    );
    assert_eq!(select_text(&card, ".card-title"), ["Post 7"]);
    assert_eq!(
        select_text(&card, ".card-byline"),
        [format!("Made by ana, {}", format_timestamp("2024-01-15T12:00:00"))]
    );
    assert_eq!(select_text(&card, ".tag-badge"), ["rust", "cli"]);
    assert_eq!(select_text(&card, ".copy-button"), ["Copy"]);
    assert_eq!(select_text(&card, ".like-button"), ["Like"]);
    assert_eq!(select_text(&card, ".rating-badge"), ["1"]);
}

#[tokio::test]
async fn test_request_state_labels() {
    let server = mock_backend().await;
    let cases: [(u64, Value, &str); 4] = [
        (1, json!(true), "Solved"),
        (2, json!(false), "Open"),
        (3, Value::Null, "Unknown"),
        (4, json!("yes"), "Unknown"),
    ];
    for (id, state, _) in &cases {
        mount_json(&server, &format!("/api/request/{id}"), request_json(*id, state.clone())).await;
    }

    let renderer = renderer(&server);
    for (id, _, label) in cases {
        let card = renderer
            .load_card(Namespace::Kind(ContentKind::Request), ItemRef::Id(id))
            .await
            .unwrap()
            .found()
            .unwrap()
            .into_string();
        assert_eq!(select_text(&card, ".card-state"), [label], "request {id}");
    }
}

#[tokio::test]
async fn test_missing_tags_render_no_badges() {
    let server = mock_backend().await;
    mount_json(&server, "/api/post/5", post_json(5)).await;
    mount_json(&server, "/api/tags/5", json!("404")).await;

    let card = renderer(&server)
        .load_card(Namespace::Kind(ContentKind::Post), ItemRef::Id(5))
        .await
        .unwrap()
        .found()
        .unwrap()
        .into_string();

    assert!(select_text(&card, ".tag-badge").is_empty());
    assert!(!card.contains("Tags:"));
}

#[tokio::test]
async fn test_add_card_by_id_appends_or_reports_missing() {
    let server = mock_backend().await;
    mount_json(&server, "/api/yell/2", post_json(2)).await;
    mount_json(&server, "/api/yell/3", json!("404")).await;

    let renderer = renderer(&server);
    let page = Page::discover();

    let added = renderer
        .add_card_by_id(Namespace::Yell, ItemRef::Id(2), &page, ids::MAIN)
        .await
        .unwrap();
    let missing = renderer
        .add_card_by_id(Namespace::Yell, ItemRef::Id(3), &page, ids::MAIN)
        .await
        .unwrap();

    assert_eq!(added, Lookup::Found(()));
    assert_eq!(missing, Lookup::NotFound);
    assert_eq!(common::card_ids(&page, ids::MAIN), [2]);
}

#[tokio::test]
async fn test_add_card_to_missing_container_fails() {
    let server = mock_backend().await;
    mount_json(&server, "/api/yell/2", post_json(2)).await;

    let result = renderer(&server)
        .add_card_by_id(Namespace::Yell, ItemRef::Id(2), &Page::home(), ids::MAIN)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_legacy_card_uses_legacy_tags() {
    let server = mock_backend().await;
    mount_json(
        &server,
        "/yell/8",
        json!({"yell_id": 8, "author": "dee", "yell_title": "Old", "yell_filename": "a.py"}),
    )
    .await;
    mount_json(&server, "/tags/8", json!(["vintage"])).await;

    let card = renderer(&server)
        .load_legacy_card(ItemRef::Id(8))
        .await
        .unwrap()
        .found()
        .unwrap()
        .into_string();

    assert_eq!(select_text(&card, ".tag-badge"), ["vintage"]);
    assert_eq!(select_text(&card, ".card-filename"), ["a.py"]);
}
