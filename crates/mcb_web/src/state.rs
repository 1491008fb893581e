use std::sync::Arc;
use mcb_content::{ClientConfig, ContentClient};
use mcb_core::{ArticleSource, Result, SiteConfig};
use mcb_site::{AdConfig, Analytics, NewsletterClient};

pub struct AppState {
    pub articles: Arc<dyn ArticleSource>,
    pub newsletter: NewsletterClient,
    pub analytics: Analytics,
    pub ads: AdConfig,
    pub site: SiteConfig,
}

impl AppState {
    /// Wires every service from one site configuration.
    pub fn from_site(site: SiteConfig) -> Result<Self> {
        let content = ContentClient::new(ClientConfig::from_site(&site)?);
        Ok(Self {
            articles: Arc::new(content),
            newsletter: NewsletterClient::from_site(&site)?,
            analytics: Analytics::from_site(&site),
            ads: AdConfig::from_site(&site),
            site,
        })
    }

    pub fn with_articles(mut self, articles: Arc<dyn ArticleSource>) -> Self {
        self.articles = articles;
        self
    }
}
