use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use prompt_gallery::{
    ai::{MockIdeaExtractor, TextClient},
    generator::{proxy_url, Generator, SEED_LIMIT},
    image::{ImageClient, MockImageSource},
    models::GenerationResponse,
    server::{router, AppState},
    store::{MockGenerationLog, NoopLog},
};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{header as header_matcher, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_app(extractor: MockIdeaExtractor, images: MockImageSource) -> Router {
    router(AppState::new(
        Generator::new(Box::new(extractor), Box::new(NoopLog)),
        Arc::new(images),
    ))
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn post_json(app: Router, uri: &str, body: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_index_serves_landing_page() {
    let app = mock_app(MockIdeaExtractor::new(), MockImageSource::new());
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("/generate"));
}

#[tokio::test]
async fn test_generate_end_to_end_with_text_api() {
    let text_api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"["a fluffy cat sitting", "a dog running in a field"]"#),
        )
        .expect(1)
        .mount(&text_api)
        .await;

    let log = MockGenerationLog::new();
    let extractor = TextClient::new("test-key".to_string(), text_api.uri());
    let app = router(AppState::new(
        Generator::new(Box::new(extractor), Box::new(log.clone())),
        Arc::new(MockImageSource::new()),
    ));

    let response = post_json(app, "/generate", r#"{"text": "A cat sits. A dog runs."}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: GenerationResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let prompts: Vec<&str> = body.images.iter().map(|r| r.prompt.as_str()).collect();
    assert_eq!(prompts, vec!["a fluffy cat sitting", "a dog running in a field"]);

    for record in &body.images {
        assert!(record.seed < SEED_LIMIT);
        assert_eq!(record.url, proxy_url(&record.prompt, record.seed));
    }
    assert_eq!(log.get_entries().len(), 2);
}

#[tokio::test]
async fn test_generate_empty_text_is_400_without_extraction() {
    let extractor = MockIdeaExtractor::new();
    let app = mock_app(extractor.clone(), MockImageSource::new());

    let response = post_json(app, "/generate", r#"{"text": ""}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No text provided");
    assert_eq!(extractor.get_call_count(), 0);
}

#[tokio::test]
async fn test_generate_missing_text_field_is_400() {
    let app = mock_app(MockIdeaExtractor::new(), MockImageSource::new());
    let response = post_json(app, "/generate", "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_malformed_body_is_json_400() {
    let app = mock_app(MockIdeaExtractor::new(), MockImageSource::new());
    let response = post_json(app, "/generate", "not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_generate_survives_failing_log() {
    let log = MockGenerationLog::new().with_failure(true);
    let extractor = MockIdeaExtractor::new().with_prompts(&["a red fox", "a snowy hill"]);
    let app = router(AppState::new(
        Generator::new(Box::new(extractor), Box::new(log.clone())),
        Arc::new(MockImageSource::new()),
    ));

    let response = post_json(app, "/generate", r#"{"text": "A fox on a hill."}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["images"].as_array().unwrap().len(), 2);
    assert_eq!(log.get_attempt_count(), 2);
}

#[tokio::test]
async fn test_image_proxy_without_prompt_is_400_and_skips_upstream() {
    let images = MockImageSource::new();
    let app = mock_app(MockIdeaExtractor::new(), images.clone());

    let response = get(app, "/image_proxy?width=512").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"No prompt provided".to_vec());
    assert!(images.get_requests().is_empty());
}

#[tokio::test]
async fn test_image_proxy_streams_upstream_response() {
    let image_api = MockServer::start().await;
    let image_bytes = vec![0xABu8; 5000];

    Mock::given(method("GET"))
        .and(path("/image/a%20fluffy%20cat"))
        .and(header_matcher("Authorization", "Bearer test-key"))
        .and(query_param("width", "768"))
        .and(query_param("height", "768"))
        .and(query_param("seed", "99"))
        .and(query_param("nologo", "true"))
        .and(query_param("model", "flux"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .insert_header("x-upstream", "pollinations")
                .set_body_bytes(image_bytes.clone()),
        )
        .expect(1)
        .mount(&image_api)
        .await;

    let images = ImageClient::new("test-key".to_string(), image_api.uri(), "flux".to_string());
    let app = router(AppState::new(
        Generator::new(Box::new(MockIdeaExtractor::new()), Box::new(NoopLog)),
        Arc::new(images),
    ));

    let response = get(app, "/image_proxy?prompt=a%20fluffy%20cat&seed=99").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    assert_eq!(response.headers()["x-upstream"], "pollinations");
    assert!(response.headers().get("content-length").is_none());
    assert_eq!(body_bytes(response).await, image_bytes);
}

#[tokio::test]
async fn test_image_proxy_repeated_keys_use_first_value() {
    let images = MockImageSource::new();
    let app = mock_app(MockIdeaExtractor::new(), images.clone());

    let response = get(app, "/image_proxy?prompt=a%20cat&prompt=a%20dog&seed=1&seed=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let requests = images.get_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt, "a cat");
    assert_eq!(requests[0].seed, "1");
}

#[tokio::test]
async fn test_image_proxy_relays_upstream_status() {
    let images = MockImageSource::new()
        .with_status(StatusCode::TOO_MANY_REQUESTS)
        .with_header("content-length", "9")
        .with_body(b"slow down".to_vec());
    let app = mock_app(MockIdeaExtractor::new(), images.clone());

    let response = get(app, "/image_proxy?prompt=cat&width=abc").await;

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_bytes(response).await, b"slow down".to_vec());

    let requests = images.get_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].width, "abc");
    assert_eq!(requests[0].height, "768");
    assert_eq!(requests[0].nologo, "true");
}

#[tokio::test]
async fn test_image_proxy_upstream_failure_is_500_text() {
    let images = MockImageSource::new().with_failure(true);
    let app = mock_app(MockIdeaExtractor::new(), images);

    let response = get(app, "/image_proxy?prompt=cat").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("Mock connection failure"));
}

#[tokio::test]
async fn test_generated_urls_round_trip_through_proxy() {
    let images = MockImageSource::new();
    let extractor = MockIdeaExtractor::new().with_prompts(&["a cat & a dog"]);
    let app = mock_app(extractor, images.clone());

    let response = post_json(app.clone(), "/generate", r#"{"text": "Cats and dogs."}"#).await;
    let body: GenerationResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let record = &body.images[0];

    let response = get(app, &record.url).await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = images.get_requests();
    assert_eq!(requests[0].prompt, "a cat & a dog");
    assert_eq!(requests[0].seed, record.seed.to_string());
    assert_eq!(requests[0].width, "768");
}
