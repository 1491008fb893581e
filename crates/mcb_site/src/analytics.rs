//! PostHog event capture. Fire-and-forget: nothing here ever returns an error.

use std::fmt;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;
use mcb_core::SiteConfig;

pub const PAGE_VIEW_EVENT: &str = "$pageview";

#[derive(Serialize)]
struct CaptureRequest<'a> {
    api_key: &'a str,
    event: &'a str,
    distinct_id: &'a str,
    properties: Map<String, Value>,
    timestamp: String,
}

#[derive(Clone)]
pub struct Analytics {
    http: Client,
    api_key: Option<String>,
    capture_url: Option<Url>,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("capture_url", &self.capture_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl Analytics {
    /// A tracker that is disabled when `api_key` is missing or `host` is unusable.
    pub fn new(api_key: Option<String>, host: &str) -> Self {
        let capture_url = match Url::parse(host).and_then(|h| h.join("/capture/")) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("[analytics] invalid PostHog host {:?}: {}", host, e);
                None
            }
        };
        if api_key.is_none() {
            tracing::warn!("[analytics] PostHog not configured, events are dropped");
        }
        Self {
            http: Client::new(),
            api_key,
            capture_url,
        }
    }

    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            api_key: None,
            capture_url: None,
        }
    }

    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(site.posthog_key.clone(), &site.posthog_host)
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some() && self.capture_url.is_some()
    }

    pub async fn track_page_view(&self, distinct_id: &str, page: &str) -> bool {
        let mut properties = Map::new();
        properties.insert("page".to_string(), Value::String(page.to_string()));
        self.track_event(distinct_id, PAGE_VIEW_EVENT, properties).await
    }

    /// Sends one event; returns whether PostHog accepted it.
    pub async fn track_event(&self, distinct_id: &str, event: &str, properties: Map<String, Value>) -> bool {
        let (Some(api_key), Some(url)) = (&self.api_key, &self.capture_url) else {
            return false;
        };

        let body = CaptureRequest {
            api_key,
            event,
            distinct_id,
            properties,
            timestamp: Utc::now().to_rfc3339(),
        };

        match self.http.post(url.clone()).json(&body).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!("[analytics] {} rejected with {}", event, response.status());
                false
            }
            Err(e) => {
                tracing::debug!("[analytics] {} not sent: {}", event, e);
                false
            }
        }
    }

    /// Sends in the background without waiting for the outcome.
    pub fn spawn_event(&self, distinct_id: String, event: String, properties: Map<String, Value>) {
        if !self.is_enabled() {
            return;
        }
        let analytics = self.clone();
        tokio::spawn(async move {
            analytics.track_event(&distinct_id, &event, properties).await;
        });
    }
}
