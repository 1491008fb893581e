//! Wire schema of the headless content API and its mapping into [`Article`].
//!
//! Payloads are decoded once here; nothing downstream sees untyped JSON.

use chrono::Utc;
use serde::Deserialize;
use mcb_core::{reading_time, Article, CardInfo};

/// Body of `GET /sites-by-id/<site>`. A missing `articles` key reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListResponse {
    #[serde(default)]
    pub articles: Vec<RemoteArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteArticle {
    #[serde(default)]
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub card_info: Option<CardInfo>,
    /// Per-locale renditions. `null` and absent both read as none.
    #[serde(default)]
    pub locales: Option<Vec<LocaleVariant>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleVariant {
    pub locale: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub main_image: Option<String>,
}

impl RemoteArticle {
    /// The variant matching `locale` (ASCII case-insensitive), else the first one.
    pub fn variant(&self, locale: &str) -> Option<&LocaleVariant> {
        let locales = self.locales.as_deref().unwrap_or_default();
        locales
            .iter()
            .find(|v| v.locale.eq_ignore_ascii_case(locale))
            .or_else(|| locales.first())
    }

    pub fn into_article(self, locale: &str) -> Article {
        let variant = self.variant(locale).cloned().unwrap_or_default();
        let content = variant.body.unwrap_or_default();

        Article {
            title: non_empty(variant.title).unwrap_or_else(|| self.slug.clone()),
            excerpt: variant.summary.unwrap_or_default(),
            reading_time: reading_time(&content),
            content,
            image: non_empty(variant.main_image),
            author: self.author,
            published_at: self.published_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
            category: self.category,
            tags: self.tags.unwrap_or_default(),
            card_info: self.card_info,
            id: self.id,
            slug: self.slug,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
