use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use mcb_content::DEFAULT_LIMIT;
use mcb_core::Article;
use mcb_site::{
    simulator::{self, format_brl},
    AdSlot, CardOffer, CreditScore, Lead, Profile, ScriptSet, Subscription,
};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ArticleList {
    pub articles: Vec<Article>,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: Article,
    pub source: String,
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Json<ArticleList> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let resolved = state.articles.list_articles(limit, offset).await;

    Json(ArticleList {
        source: resolved.origin.to_string(),
        articles: resolved.value,
    })
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ArticleResponse>> {
    let resolved = state.articles.get_article_by_slug(&slug).await;
    let source = resolved.origin.to_string();

    match resolved.value {
        Some(article) => Ok(Json(ArticleResponse { article, source })),
        None => Err(ApiError::not_found(format!("Artigo não encontrado: {}", slug))),
    }
}

#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    pub email: String,
}

pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubscribeBody>,
) -> ApiResult<Json<Subscription>> {
    Ok(Json(state.newsletter.subscribe(&body.email).await?))
}

pub async fn capture_lead(
    State(state): State<Arc<AppState>>,
    Json(lead): Json<Lead>,
) -> ApiResult<Json<Subscription>> {
    Ok(Json(state.newsletter.capture_lead(lead).await?))
}

#[derive(Debug, Deserialize)]
pub struct SimulateParams {
    pub spend: f64,
    pub score: Option<String>,
    #[serde(default)]
    pub employee: bool,
    #[serde(default)]
    pub income: bool,
}

#[derive(Debug, Serialize)]
pub struct Simulation {
    pub limit: f64,
    pub limit_display: String,
    pub offers: Vec<CardOffer>,
}

pub async fn simulate(Query(params): Query<SimulateParams>) -> ApiResult<Json<Simulation>> {
    let score = match params.score.as_deref() {
        Some(raw) => raw.parse::<CreditScore>()?,
        None => CreditScore::default(),
    };
    let profile = Profile {
        monthly_spend: params.spend,
        score,
        employed: params.employee,
        has_income: params.income,
    };

    let limit = profile.limit()?;
    Ok(Json(Simulation {
        limit,
        limit_display: format_brl(limit),
        offers: simulator::simulate(&profile)?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TrackBody {
    pub distinct_id: String,
    pub page: Option<String>,
    pub event: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Queues an analytics event and answers before it is delivered.
pub async fn track(State(state): State<Arc<AppState>>, Json(body): Json<TrackBody>) -> StatusCode {
    let mut properties = body.properties;
    let event = match (body.event, body.page) {
        (Some(event), page) => {
            if let Some(page) = page {
                properties.insert("page".to_string(), Value::String(page));
            }
            event
        }
        (None, Some(page)) => {
            properties.insert("page".to_string(), Value::String(page));
            mcb_site::analytics::PAGE_VIEW_EVENT.to_string()
        }
        (None, None) => return StatusCode::UNPROCESSABLE_ENTITY,
    };

    state.analytics.spawn_event(body.distinct_id, event, properties);
    StatusCode::ACCEPTED
}

#[derive(Debug, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
    pub locale: String,
    pub scripts: ScriptSet,
    pub ad_slots: Vec<AdSlot>,
    pub analytics_enabled: bool,
}

pub async fn site_info(State(state): State<Arc<AppState>>) -> Json<SiteInfo> {
    let mut scripts = ScriptSet::new();
    state.ads.install(&mut scripts);

    Json(SiteInfo {
        name: state.site.site_name.clone(),
        url: state.site.site_url.clone(),
        locale: state.site.locale.clone(),
        scripts,
        ad_slots: state.ads.slots(),
        analytics_enabled: state.analytics.is_enabled(),
    })
}
