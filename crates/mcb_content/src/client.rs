use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;
use mcb_core::config::{DEFAULT_CACHE_TTL, DEFAULT_LOCALE};
use mcb_core::{Article, ArticleSource, FallbackReason, Resolved, SiteConfig};
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::fallback;
use crate::logging::Logger;
use crate::remote::{ArticleListResponse, RemoteArticle};

pub const DEFAULT_LIMIT: usize = 10;

/// Everything that can go wrong on a single remote call. Never leaves the
/// client: each variant is logged and turned into a [`FallbackReason`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("article not found")]
    NotFound,

    #[error("malformed body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("empty article list")]
    Empty,

    #[error("cannot build request URL from {0}")]
    InvalidUrl(String),
}

impl From<&FetchError> for FallbackReason {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Transport(_) | FetchError::InvalidUrl(_) => FallbackReason::Transport,
            FetchError::Status(status) => FallbackReason::Status(status.as_u16()),
            FetchError::NotFound => FallbackReason::NotFound,
            FetchError::Malformed(_) => FallbackReason::Malformed,
            FetchError::Empty => FallbackReason::Empty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub site_id: String,
    pub locale: String,
    pub cache_ttl: Duration,
}

impl ClientConfig {
    pub fn new(api_url: Url, site_id: impl Into<String>) -> Self {
        Self {
            api_url,
            site_id: site_id.into(),
            locale: DEFAULT_LOCALE.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn from_site(site: &SiteConfig) -> mcb_core::Result<Self> {
        Ok(Self::new(site.api_base()?, site.site_id.clone())
            .with_locale(site.locale.clone())
            .with_cache_ttl(site.cache_ttl))
    }
}

/// Article retrieval with remote-first, static-fallback semantics.
///
/// Single article lookups that hit the remote API are cached by slug for
/// the configured TTL; list lookups are never cached. One attempt per
/// call, no retries, no client-side timeout.
pub struct ContentClient {
    http: Client,
    config: ClientConfig,
    cache: TtlCache<Article>,
    log: Logger,
}

impl fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("http", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl ContentClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> Self {
        let log = Logger::new().with_new_prefixes("content");
        log.info(&format!("🔧 initialised (api: {}, site: {}, locale: {})", config.api_url, config.site_id, config.locale));
        Self {
            http: Client::new(),
            cache: TtlCache::new(config.cache_ttl, clock),
            config,
            log,
        }
    }

    /// Swaps the HTTP client, e.g. to share a connection pool.
    pub fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn site_url(&self) -> Result<Url, FetchError> {
        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.api_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "headless", "sites-by-id", self.config.site_id.as_str()]);
        Ok(url)
    }

    pub fn list_url(&self, limit: usize, offset: usize) -> Result<Url, FetchError> {
        let mut url = self.site_url()?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("locale", &self.config.locale);
        Ok(url)
    }

    pub fn article_url(&self, slug: &str) -> Result<Url, FetchError> {
        let mut url = self.site_url()?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.api_url.to_string()))?
            .extend(["articles", slug]);
        url.query_pairs_mut().append_pair("locale", &self.config.locale);
        Ok(url)
    }

    async fn fetch_list(&self, limit: usize, offset: usize) -> Result<Vec<Article>, FetchError> {
        let url = self.list_url(limit, offset)?;
        self.log.debug(&format!("🌐 GET {}", url));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let list: ArticleListResponse = serde_json::from_slice(&body)?;
        if list.articles.is_empty() {
            return Err(FetchError::Empty);
        }

        Ok(list
            .articles
            .into_iter()
            .map(|remote| remote.into_article(&self.config.locale))
            .collect())
    }

    async fn fetch_article(&self, slug: &str) -> Result<Article, FetchError> {
        let url = self.article_url(slug)?;
        self.log.debug(&format!("🌐 GET {}", url));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let remote: RemoteArticle = serde_json::from_slice(&body)?;
        Ok(remote.into_article(&self.config.locale))
    }

    /// Recent articles in remote order, or the fallback page `[offset, offset + limit)`.
    pub async fn list_articles(&self, limit: usize, offset: usize) -> Resolved<Vec<Article>> {
        let log = self.log.with_prefix("list_articles");
        log.debug(&format!("📥 limit={} offset={}", limit, offset));

        match self.fetch_list(limit, offset).await {
            Ok(articles) => {
                log.info(&format!("✅ {} articles from API", articles.len()));
                Resolved::remote(articles)
            }
            Err(err) => {
                let reason = FallbackReason::from(&err);
                log.warn(&format!("❌ API unavailable ({}), using static articles", err));
                Resolved::fallback(fallback::page(limit, offset), reason)
            }
        }
    }

    /// Cached, remote or static article for `slug`; `None` when nobody has it.
    pub async fn get_article_by_slug(&self, slug: &str) -> Resolved<Option<Article>> {
        let log = self.log.with_prefix("get_article_by_slug");

        if let Some(article) = self.cache.get(slug).await {
            log.debug(&format!("💨 cache hit: {}", slug));
            return Resolved::cached(Some(article));
        }

        match self.fetch_article(slug).await {
            Ok(article) => {
                self.cache.insert(slug, article.clone()).await;
                log.info(&format!("✅ {} from API", slug));
                Resolved::remote(Some(article))
            }
            Err(err) => {
                let reason = FallbackReason::from(&err);
                match err {
                    FetchError::NotFound => log.info(&format!("⚠️ {} not found in API", slug)),
                    _ => log.warn(&format!("❌ API failed for {} ({})", slug, err)),
                }
                let article = fallback::find(slug);
                if article.is_none() {
                    log.info(&format!("📋 {} not in static articles either", slug));
                }
                Resolved::fallback(article, reason)
            }
        }
    }
}

#[async_trait]
impl ArticleSource for ContentClient {
    async fn list_articles(&self, limit: usize, offset: usize) -> Resolved<Vec<Article>> {
        ContentClient::list_articles(self, limit, offset).await
    }

    async fn get_article_by_slug(&self, slug: &str) -> Resolved<Option<Article>> {
        ContentClient::get_article_by_slug(self, slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ContentClient {
        ContentClient::new(ClientConfig::new(Url::parse(base).unwrap(), "site-1"))
    }

    #[test]
    fn test_list_url() {
        let url = client("https://digitalreach.app").list_url(2, 1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://digitalreach.app/api/headless/sites-by-id/site-1?limit=2&offset=1&locale=pt-BR"
        );
    }

    #[test]
    fn test_article_url_keeps_base_path_and_encodes_slug() {
        let url = client("http://localhost:3000/api-proxy/").article_url("a b/c").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api-proxy/api/headless/sites-by-id/site-1/articles/a%20b%2Fc?locale=pt-BR"
        );
    }

    #[test]
    fn test_unusable_base_url() {
        let client = client("mailto:someone@example.com");
        assert!(matches!(client.list_url(1, 0), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_fallback_reason_mapping() {
        assert_eq!(FallbackReason::from(&FetchError::NotFound), FallbackReason::NotFound);
        assert_eq!(FallbackReason::from(&FetchError::Empty), FallbackReason::Empty);
        assert_eq!(
            FallbackReason::from(&FetchError::Status(StatusCode::BAD_GATEWAY)),
            FallbackReason::Status(502)
        );
        assert_eq!(
            FallbackReason::from(&FetchError::InvalidUrl("x".to_string())),
            FallbackReason::Transport
        );
    }
}
