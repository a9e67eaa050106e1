//! Integration tests for the backend API client.

mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{api, comment_json, mock_backend, mount_json, post_json, request_json};
use yells_client::error::ClientError;
use yells_client::model::{
    CommentRef, ContentKind, ContentRecord, ItemRef, LikeStatus, Lookup, Namespace, RequestState,
    ToggleReply,
};

#[tokio::test]
async fn test_fetch_item_json_sentinel_is_not_found() {
    let server = mock_backend().await;
    mount_json(&server, "/api/yell/9", json!("404")).await;

    let result = api(&server)
        .fetch_item(Namespace::Yell, ItemRef::Id(9))
        .await
        .unwrap();
    assert_eq!(result, Lookup::NotFound);
}

#[tokio::test]
async fn test_fetch_item_text_sentinel_and_status_are_not_found() {
    let server = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/post/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("404"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/post/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api(&server);
    let namespace = Namespace::Kind(ContentKind::Post);
    assert!(!api.fetch_item(namespace, ItemRef::Id(1)).await.unwrap().is_found());
    assert!(!api.fetch_item(namespace, ItemRef::Id(2)).await.unwrap().is_found());
}

#[tokio::test]
async fn test_fetch_item_server_error_propagates() {
    let server = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/yell/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api(&server)
        .fetch_item(Namespace::Yell, ItemRef::Id(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 500));
}

#[tokio::test]
async fn test_fetch_item_malformed_body_is_decode_error() {
    let server = mock_backend().await;
    Mock::given(method("GET"))
        .and(path("/api/yell/4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    mount_json(&server, "/api/yell/5", json!({"base_type": "poll", "content_id": 5})).await;

    let api = api(&server);
    assert!(matches!(
        api.fetch_item(Namespace::Yell, ItemRef::Id(4)).await,
        Err(ClientError::Decode { .. })
    ));
    assert!(matches!(
        api.fetch_item(Namespace::Yell, ItemRef::Id(5)).await,
        Err(ClientError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_yell_namespace_decodes_by_tag() {
    let server = mock_backend().await;
    mount_json(&server, "/api/yell/last", request_json(12, json!(true))).await;
    mount_json(&server, "/api/yell/rated", post_json(3)).await;

    let api = api(&server);
    let last = api
        .fetch_item(Namespace::Yell, ItemRef::Last)
        .await
        .unwrap()
        .found()
        .unwrap();
    match last {
        ContentRecord::Request(request) => {
            assert_eq!(request.base.content_id, 12);
            assert_eq!(request.request_state, RequestState::Solved);
        }
        other => panic!("expected a request, got {other:?}"),
    }

    let rated = api
        .fetch_item(Namespace::Yell, ItemRef::Rated)
        .await
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(rated.kind(), ContentKind::Post);
    assert_eq!(rated.href(), "post/3");
}

#[tokio::test]
async fn test_concrete_namespace_ignores_tag() {
    let server = mock_backend().await;
    let mut body = comment_json(6);
    body["base_type"] = json!("pst");
    mount_json(&server, "/api/comment/6", body).await;

    let record = api(&server)
        .fetch_item(Namespace::Kind(ContentKind::Comment), ItemRef::Id(6))
        .await
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(record.kind(), ContentKind::Comment);
}

#[tokio::test]
async fn test_tags_and_comment_set() {
    let server = mock_backend().await;
    mount_json(&server, "/api/commentset/3", json!({"comments": [{"comment_id": 10}, {"comment_id": 11}]})).await;
    mount_json(&server, "/api/commentset/4", json!("404")).await;
    mount_json(&server, "/tags/3", json!(["legacy"])).await;

    let api = api(&server);
    assert_eq!(
        api.fetch_tags(3).await.unwrap(),
        Lookup::Found(vec!["rust".to_string(), "cli".to_string()])
    );
    assert_eq!(
        api.fetch_legacy_tags(3).await.unwrap(),
        Lookup::Found(vec!["legacy".to_string()])
    );

    let set = api.fetch_comment_set(3).await.unwrap().found().unwrap();
    assert_eq!(
        set.comments,
        [CommentRef { comment_id: 10 }, CommentRef { comment_id: 11 }]
    );
    assert_eq!(api.fetch_comment_set(4).await.unwrap(), Lookup::NotFound);
}

#[tokio::test]
async fn test_legacy_yell_becomes_post() {
    let server = mock_backend().await;
    mount_json(
        &server,
        "/yell/8",
        json!({
            "yell_id": 8,
            "author": "dee",
            "yell_title": "Old yell",
            "yell_description": "from before",
            "yell_code": "print(1)",
            "yell_filename": "a.py",
            "yell_rating": 4.0,
            "yell_datetime": "2023-05-01T09:00:00",
        }),
    )
    .await;

    let record = api(&server)
        .fetch_legacy_yell(ItemRef::Id(8))
        .await
        .unwrap()
        .found()
        .unwrap();
    let ContentRecord::Post(post) = record else {
        panic!("legacy yells are posts");
    };
    assert_eq!(post.base.content_id, 8);
    assert_eq!(post.base.base_rating, 4);
    assert_eq!(post.post_filename, "a.py");
    assert_eq!(post.post_code, "print(1)");
}

#[tokio::test]
async fn test_like_endpoints_parse_text() {
    let server = mock_backend().await;
    for (route, body) in [
        ("/request/2/status", "True"),
        ("/request/2/like", "yay"),
        ("/request/2/unlike", "unlogged"),
        ("/comment/5/status", "maybe"),
        ("/comment/5/like", "nope"),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let api = api(&server);
    assert_eq!(api.like_status(ContentKind::Request, 2).await.unwrap(), LikeStatus::Liked);
    assert_eq!(api.like_status(ContentKind::Post, 2).await.unwrap(), LikeStatus::NotLiked);
    assert_eq!(api.like_status(ContentKind::Comment, 5).await.unwrap(), LikeStatus::Unknown);
    assert_eq!(api.like(ContentKind::Request, 2).await.unwrap(), ToggleReply::Done);
    assert_eq!(api.unlike(ContentKind::Request, 2).await.unwrap(), ToggleReply::Unlogged);
    assert_eq!(
        api.like(ContentKind::Comment, 5).await.unwrap(),
        ToggleReply::Unexpected("nope".to_string())
    );
}

#[tokio::test]
async fn test_fetch_last_id_reads_only_the_id() {
    let server = mock_backend().await;
    mount_json(
        &server,
        "/api/yell/last",
        json!({"base_type": "poll", "content_id": 42}),
    )
    .await;
    mount_json(&server, "/api/post/last", json!("404")).await;

    let api = api(&server);
    assert_eq!(
        api.fetch_last_id(Namespace::Yell).await.unwrap(),
        Lookup::Found(42)
    );
    assert_eq!(
        api.fetch_last_id(Namespace::Kind(ContentKind::Post)).await.unwrap(),
        Lookup::NotFound
    );
}
