//! Site wide configuration.
//!
//! Every setting is optional and falls back to the production defaults of
//! the Melhores Cartões Brasil site. Values are read once at startup and
//! treated as immutable afterwards.

use std::time::Duration;
use url::Url;
use crate::{Error, Result};

pub const DEFAULT_SITE_ID: &str = "3d6c918d-5c39-47e9-8109-be79b2e8c302";
pub const DEFAULT_SITE_NAME: &str = "Melhores Cartões Brasil";
pub const DEFAULT_SITE_URL: &str = "https://melhorescartoesbrasil.com";
pub const DEFAULT_API_URL: &str = "https://digitalreach.app";
pub const DEFAULT_LOCALE: &str = "pt-BR";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POSTHOG_HOST: &str = "https://us.i.posthog.com";
pub const DEFAULT_REVIVE_URL: &str = "ads.digitalreach.app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviveZones {
    pub header: String,
    pub sidebar: String,
    pub in_article_1: String,
    pub in_article_2: String,
    pub sticky_footer: String,
}

impl Default for ReviveZones {
    fn default() -> Self {
        Self {
            header: "632".to_string(),
            sidebar: "633".to_string(),
            in_article_1: "634".to_string(),
            in_article_2: "635".to_string(),
            sticky_footer: "636".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_id: String,
    pub site_name: String,
    pub site_url: String,
    pub api_url: String,
    pub locale: String,
    pub cache_ttl: Duration,
    pub posthog_key: Option<String>,
    pub posthog_host: String,
    pub revive_url: Option<String>,
    pub revive_id: Option<String>,
    pub revive_zones: ReviveZones,
    pub newsletter_endpoint: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_id: DEFAULT_SITE_ID.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            posthog_key: None,
            posthog_host: DEFAULT_POSTHOG_HOST.to_string(),
            revive_url: Some(DEFAULT_REVIVE_URL.to_string()),
            revive_id: None,
            revive_zones: ReviveZones::default(),
            newsletter_endpoint: None,
        }
    }
}

/// Outcome of [`SiteConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub missing: Vec<&'static str>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

impl SiteConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        let zones = ReviveZones::default();

        let cache_ttl = match get("CACHE_TTL_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| Error::Config(format!("CACHE_TTL_SECS must be a number of seconds, got {:?}", raw)))?;
                Duration::from_secs(secs)
            }
            None => defaults.cache_ttl,
        };

        Ok(Self {
            site_id: get("SITE_ID").unwrap_or(defaults.site_id),
            site_name: get("SITE_NAME").unwrap_or(defaults.site_name),
            site_url: get("SITE_URL").unwrap_or(defaults.site_url),
            api_url: get("API_URL").unwrap_or(defaults.api_url),
            locale: get("LOCALE").unwrap_or(defaults.locale),
            cache_ttl,
            posthog_key: get("POSTHOG_KEY"),
            posthog_host: get("POSTHOG_HOST").unwrap_or(defaults.posthog_host),
            revive_url: get("REVIVE_URL").or(defaults.revive_url),
            revive_id: get("REVIVE_ID"),
            revive_zones: ReviveZones {
                header: get("REVIVE_ZONE_HEADER").unwrap_or(zones.header),
                sidebar: get("REVIVE_ZONE_SIDEBAR").unwrap_or(zones.sidebar),
                in_article_1: get("REVIVE_ZONE_INARTICLE_1").unwrap_or(zones.in_article_1),
                in_article_2: get("REVIVE_ZONE_INARTICLE_2").unwrap_or(zones.in_article_2),
                sticky_footer: get("REVIVE_ZONE_STICKY_FOOTER").unwrap_or(zones.sticky_footer),
            },
            newsletter_endpoint: get("NEWSLETTER_ENDPOINT"),
        })
    }

    /// Reports the critical settings that are blank.
    pub fn validate(&self) -> Validation {
        let mut missing = Vec::new();
        if self.site_id.trim().is_empty() {
            missing.push("SITE_ID");
        }
        if self.api_url.trim().is_empty() {
            missing.push("API_URL");
        }
        Validation { missing }
    }

    /// Parsed content API base URL.
    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.api_url, e)))
    }
}
