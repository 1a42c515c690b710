//! Integration tests for the HTTP post source against a local mock server.

use postdeck::{Comment, HttpPostSource, Post, PostSource, PostdeckError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_json(id: u64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "userId": 1,
        "id": id,
        "title": title,
        "body": format!("body of {title}")
    })
}

#[tokio::test]
async fn fetch_page_sends_limit_and_page_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_limit", "12"))
        .and(query_param("_page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![post_json(25, "alpha"), post_json(26, "beta")]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    let posts: Vec<Post> = source.fetch_page(12, 3).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 25);
    assert_eq!(posts[0].title, "alpha");
}

#[tokio::test]
async fn fetch_page_tolerates_unknown_fields() {
    // JSONPlaceholder payloads carry userId and whatever else; only the
    // fields the domain model declares should matter.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![serde_json::json!({
            "userId": 7,
            "id": 1,
            "title": "t",
            "body": "b",
            "extra": {"nested": true}
        })]))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    let posts = source.fetch_page(12, 1).await.unwrap();
    assert_eq!(posts[0].body, "b");
}

#[tokio::test]
async fn fetch_post_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/9999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    assert_eq!(source.fetch_post(9999).await.unwrap(), None);
}

#[tokio::test]
async fn fetch_post_returns_existing_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json(4, "fourth")))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    let post = source.fetch_post(4).await.unwrap().expect("post exists");
    assert_eq!(post.title, "fourth");
}

#[tokio::test]
async fn server_error_surfaces_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    match source.fetch_page(12, 1).await {
        Err(PostdeckError::Status(503)) => {}
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_surfaces_as_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    match source.fetch_page(12, 1).await {
        Err(PostdeckError::Decode(_)) => {}
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_comments_filters_by_post_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![serde_json::json!({
            "postId": 5,
            "id": 21,
            "name": "first!",
            "email": "commenter@example.com",
            "body": "nice post"
        })]))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    let comments: Vec<Comment> = source.fetch_comments(5).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].email, "commenter@example.com");
}

#[tokio::test]
async fn empty_page_decodes_to_empty_vec() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&server)
        .await;

    let source = HttpPostSource::new(server.uri());
    assert!(source.fetch_page(12, 9).await.unwrap().is_empty());
}
