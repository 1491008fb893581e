use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use crate::types::Article;

/// Why a lookup was answered from the embedded dataset instead of the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "status")]
pub enum FallbackReason {
    /// Connection failure, timeout or any other transport error.
    Transport,
    /// Non-success HTTP status other than 404.
    Status(u16),
    /// The remote answered 404 for the requested slug.
    NotFound,
    /// The response body could not be decoded.
    Malformed,
    /// The remote returned an empty article list.
    Empty,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Transport => write!(f, "transport"),
            FallbackReason::Status(code) => write!(f, "status {}", code),
            FallbackReason::NotFound => write!(f, "not found"),
            FallbackReason::Malformed => write!(f, "malformed"),
            FallbackReason::Empty => write!(f, "empty"),
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Remote,
    Cache,
    Fallback(FallbackReason),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Remote => write!(f, "remote"),
            Origin::Cache => write!(f, "cache"),
            Origin::Fallback(reason) => write!(f, "fallback:{}", reason),
        }
    }
}

/// A value that always resolved, tagged with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Resolved<T> {
    pub fn remote(value: T) -> Self {
        Self { value, origin: Origin::Remote }
    }

    pub fn cached(value: T) -> Self {
        Self { value, origin: Origin::Cache }
    }

    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self { value, origin: Origin::Fallback(reason) }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback(_))
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self.origin {
            Origin::Fallback(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Recent articles, paginated. Never fails; degrades to static content.
    async fn list_articles(&self, limit: usize, offset: usize) -> Resolved<Vec<Article>>;

    /// A single article by slug, or `None` when neither source knows it.
    async fn get_article_by_slug(&self, slug: &str) -> Resolved<Option<Article>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::Remote.to_string(), "remote");
        assert_eq!(Origin::Cache.to_string(), "cache");
        assert_eq!(Origin::Fallback(FallbackReason::Status(500)).to_string(), "fallback:status 500");
        assert_eq!(Origin::Fallback(FallbackReason::NotFound).to_string(), "fallback:not found");
    }

    #[test]
    fn test_resolved_accessors() {
        let resolved = Resolved::fallback(3, FallbackReason::Empty);
        assert!(resolved.is_fallback());
        assert_eq!(resolved.fallback_reason(), Some(FallbackReason::Empty));
        assert_eq!(resolved.into_inner(), 3);

        let resolved = Resolved::cached("x");
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.fallback_reason(), None);
    }
}
