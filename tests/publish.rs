mod common;

use halo_manager::{
    ApiError,
    halo::{CONSOLE_POSTS, CONSOLE_USER_LIST, CONSOLE_USER_ME, CONTENT_POSTS, UC_USER_ME},
    mcp::adapter,
    mcp::dto::PublishBlogPostRequest,
    service::{CreatePath, PublishError, PublishRequest},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use common::{TOKEN, json_body, requests_to, service_for};

fn publish_path(name: &str) -> String {
    format!("{CONSOLE_POSTS}/{name}/publish")
}

fn request(title: &str, content: &str, slug: Option<&str>) -> PublishRequest {
    PublishRequest {
        title: title.to_string(),
        content: content.to_string(),
        slug: slug.map(str::to_string),
    }
}

#[tokio::test]
async fn draft_then_publish_returns_archive_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONSOLE_POSTS))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post": {
                "metadata": { "name": "draft-1" },
                "spec": { "headSnapshot": "snap-1" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(publish_path("draft-1")))
        .and(query_param("headSnapshot", "snap-1"))
        .and(query_param("async", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CONTENT_POSTS))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server, Some("admin"));
    let post = service
        .publish_post(request("Hello", &"A".repeat(600), None))
        .await
        .unwrap();

    assert_eq!(post.path, CreatePath::Draft);
    assert_eq!(post.name, "draft-1");
    assert!(post.slug.starts_with("post-"));
    assert_eq!(post.url, format!("{}/archives/{}", server.uri(), post.slug));

    let drafts = requests_to(&server, "POST", CONSOLE_POSTS).await;
    let body = json_body(&drafts[0]);
    let excerpt = body["post"]["spec"]["excerpt"]["raw"].as_str().unwrap();
    assert_eq!(excerpt, format!("{}...", "A".repeat(500)));
    assert_eq!(body["post"]["spec"]["publish"], false);
    assert_eq!(body["post"]["spec"]["owner"], "admin");
    assert_eq!(body["post"]["metadata"]["name"], post.slug.as_str());
    assert_eq!(body["content"]["raw"].as_str().unwrap().len(), 600);
}

#[tokio::test]
async fn draft_404_falls_back_to_content_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONSOLE_POSTS))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CONTENT_POSTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": { "name": "my-post" },
            "status": { "headSnapshot": "snap-2" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(publish_path("my-post")))
        .and(query_param("headSnapshot", "snap-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, Some("admin"));
    let post = service
        .publish_post(request("", "body", Some("My Post!")))
        .await
        .unwrap();

    assert_eq!(post.path, CreatePath::ContentFallback);
    assert_eq!(post.slug, "My-Post");
    assert_eq!(post.title, "Untitled");

    let created = requests_to(&server, "POST", CONTENT_POSTS).await;
    let body = json_body(&created[0]);
    assert_eq!(body["spec"]["publish"], true);
    assert_eq!(body["spec"]["raw"], "body");
    assert_eq!(body["metadata"]["name"], "My-Post");
}

#[tokio::test]
async fn publish_failure_is_distinct_from_create_failure() {
    let partial_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONSOLE_POSTS))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "post": { "metadata": { "name": "p1" } } })),
        )
        .mount(&partial_server)
        .await;
    Mock::given(method("PUT"))
        .and(path(publish_path("p1")))
        .respond_with(ResponseTemplate::new(500).set_body_string("publish exploded"))
        .mount(&partial_server)
        .await;

    let failed_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("create exploded"))
        .expect(2)
        .mount(&failed_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&failed_server)
        .await;

    let partial = service_for(&partial_server, Some("admin"))
        .publish_post(request("T", "c", Some("same")))
        .await
        .unwrap_err();
    let failed = service_for(&failed_server, Some("admin"))
        .publish_post(request("T", "c", Some("same")))
        .await
        .unwrap_err();

    assert_ne!(partial, failed);
    assert!(partial.resource_created());
    assert!(!failed.resource_created());
    match &partial {
        PublishError::PublishFailed { name, path, source } => {
            assert_eq!(name, "p1");
            assert_eq!(*path, CreatePath::Draft);
            assert_eq!(source, &ApiError::http(500, "publish exploded"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(failed, PublishError::CreateFailed { .. }));
}

#[tokio::test]
async fn fallback_created_but_unpublished_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONSOLE_POSTS))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CONTENT_POSTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "spec": {} })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(publish_path("kept")))
        .and(query_param("async", "false"))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, Some("admin"));
    let err = service
        .publish_post(request("T", "c", Some("kept")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PublishError::PublishFailed {
            name: "kept".to_string(),
            path: CreatePath::ContentFallback,
            source: ApiError::http(409, "conflict"),
        }
    );
}

#[tokio::test]
async fn owner_lookup_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSOLE_USER_ME))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "metadata": { "name": "writer" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, None);
    assert_eq!(service.effective_owner().await.as_deref(), Some("writer"));
    assert_eq!(service.effective_owner().await.as_deref(), Some("writer"));
}

#[tokio::test]
async fn owner_falls_back_to_user_list() {
    let server = MockServer::start().await;
    for endpoint in [CONSOLE_USER_ME, UC_USER_ME] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(CONSOLE_USER_LIST.split('?').next().unwrap()))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "spec": { "displayName": "Listed" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server, None);
    assert_eq!(service.effective_owner().await.as_deref(), Some("Listed"));
}

#[tokio::test]
async fn failed_owner_lookup_is_retried_next_time() {
    let server = MockServer::start().await;
    for endpoint in [CONSOLE_USER_ME, UC_USER_ME] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(CONSOLE_USER_LIST.split('?').next().unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server, None);
    assert_eq!(service.effective_owner().await, None);
    assert_eq!(service.effective_owner().await, None);
}

#[tokio::test]
async fn configured_owner_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server, Some(" editor "));
    assert_eq!(service.effective_owner().await.as_deref(), Some("editor"));
}

#[tokio::test]
async fn missing_owner_aborts_before_creating() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server, None);
    let err = service
        .publish_post(request("T", "c", None))
        .await
        .unwrap_err();
    assert_eq!(err, PublishError::MissingOwner);
}

#[tokio::test]
async fn tool_summary_contains_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONSOLE_POSTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(publish_path("hello-world")))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let service = service_for(&server, Some("admin"));
    let summary = adapter::publish_blog_post(
        &service,
        PublishBlogPostRequest {
            title: "Hello".to_string(),
            content: "World".to_string(),
            slug: Some("hello world".to_string()),
        },
    )
    .await;
    assert_eq!(
        summary,
        format!(
            "Published. Title: Hello, link: {}/archives/hello-world",
            server.uri()
        )
    );
}
