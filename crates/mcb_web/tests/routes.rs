use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt as _;
use mcb_content::fallback;
use mcb_core::{Article, ArticleSource, FallbackReason, Resolved, SiteConfig};
use mcb_web::{create_app, AppState};

/// Serves the embedded dataset and records the pagination it was asked for.
#[derive(Default)]
struct StubSource {
    calls: Mutex<Vec<(usize, usize)>>,
}

#[async_trait]
impl ArticleSource for StubSource {
    async fn list_articles(&self, limit: usize, offset: usize) -> Resolved<Vec<Article>> {
        self.calls.lock().unwrap().push((limit, offset));
        Resolved::fallback(fallback::page(limit, offset), FallbackReason::Status(500))
    }

    async fn get_article_by_slug(&self, slug: &str) -> Resolved<Option<Article>> {
        match fallback::find(slug) {
            Some(article) => Resolved::remote(Some(article)),
            None => Resolved::fallback(None, FallbackReason::NotFound),
        }
    }
}

fn site() -> SiteConfig {
    SiteConfig {
        // Nothing listens here, so outbound calls fail fast.
        api_url: "http://127.0.0.1:1".to_string(),
        posthog_key: None,
        ..SiteConfig::default()
    }
}

fn app_with(source: Arc<StubSource>) -> Router {
    let state = AppState::from_site(site()).unwrap().with_articles(source);
    create_app(state)
}

fn app() -> Router {
    app_with(Arc::new(StubSource::default()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_uses_default_pagination() {
    let source = Arc::new(StubSource::default());
    let (status, body) = send(app_with(source.clone()), get("/api/articles")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback:status 500");
    assert_eq!(body["articles"].as_array().unwrap().len(), 3);
    assert_eq!(*source.calls.lock().unwrap(), vec![(10, 0)]);
}

#[tokio::test]
async fn test_list_forwards_limit_and_offset() {
    let source = Arc::new(StubSource::default());
    let (status, body) = send(app_with(source.clone()), get("/api/articles?limit=1&offset=1")).await;

    assert_eq!(status, StatusCode::OK);
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0]["slug"], fallback::articles()[1].slug);
    assert_eq!(*source.calls.lock().unwrap(), vec![(1, 1)]);
}

#[tokio::test]
async fn test_list_rejects_negative_offset() {
    let (status, _) = send(app(), get("/api/articles?offset=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_article() {
    let (status, body) = send(app(), get("/api/articles/nubank-ultravioleta")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "remote");
    assert_eq!(body["article"]["slug"], "nubank-ultravioleta");
    assert!(body["article"]["readingTime"].as_str().unwrap().ends_with("min"));
    assert_eq!(body["article"]["cardInfo"]["annualFee"], "R$ 490/ano");
}

#[tokio::test]
async fn test_get_missing_article_is_404() {
    let (status, body) = send(app(), get("/api/articles/nao-existe")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("nao-existe"));
}

#[tokio::test]
async fn test_newsletter_simulates_when_endpoints_are_down() {
    let req = post_json("/api/newsletter", serde_json::json!({ "email": "ana@exemplo.com.br" }));
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channel"], "simulated");
    assert_eq!(body["message"], "Inscrição realizada!");
}

#[tokio::test]
async fn test_newsletter_rejects_invalid_email() {
    let req = post_json("/api/newsletter", serde_json::json!({ "email": "ana@" }));
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_lead_requires_name() {
    let req = post_json("/api/leads", serde_json::json!({ "nome": "  ", "email": "ana@exemplo.com" }));
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_lead_is_simulated_without_direct_endpoint() {
    let req = post_json("/api/leads", serde_json::json!({ "nome": "Ana", "email": "ana@exemplo.com" }));
    let (status, body) = send(app(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channel"], "simulated");
}

#[tokio::test]
async fn test_simulate() {
    let (status, body) = send(app(), get("/api/simulate?spend=1000&score=excellent&employee=true")).await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["limit"].as_f64().unwrap() - 3600.0).abs() < 1e-6);
    assert_eq!(body["limit_display"], "R$ 3.600");
    let offers = body["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 5);
    assert_eq!(offers[0]["name"], "Nubank");
    assert!(offers.iter().all(|o| o["limit_display"] == "R$ 3.600"));
}

#[tokio::test]
async fn test_simulate_rejects_bad_input() {
    let (status, _) = send(app(), get("/api/simulate?spend=1000&score=otimo")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(app(), get("/api/simulate?spend=-5")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_track() {
    let req = post_json("/api/track", serde_json::json!({ "distinct_id": "anon", "page": "/blog" }));
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let req = post_json("/api/track", serde_json::json!({ "distinct_id": "anon" }));
    let (status, _) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_site_info() {
    let (status, body) = send(app(), get("/api/site")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locale"], "pt-BR");
    assert_eq!(body["analytics_enabled"], false);
    assert_eq!(body["scripts"]["tags"][0]["src"], "//ads.digitalreach.app/delivery/asyncjs.php");
    assert_eq!(body["ad_slots"].as_array().unwrap().len(), 5);
    assert_eq!(body["ad_slots"][0]["zone_id"], "632");
}
