pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use config::SiteConfig;
pub use error::{Error, Result};
pub use source::{ArticleSource, FallbackReason, Origin, Resolved};
pub use types::{reading_time, Article, CardInfo};

pub mod prelude {
    pub use super::{Article, ArticleSource, Error, Resolved, Result, SiteConfig};
}
