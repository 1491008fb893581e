pub mod cache;
pub mod client;
pub mod fallback;
pub mod logging;
pub mod remote;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use client::{ClientConfig, ContentClient, FetchError, DEFAULT_LIMIT};

pub mod prelude {
    pub use super::client::{ClientConfig, ContentClient};
    pub use mcb_core::{Article, ArticleSource, FallbackReason, Origin, Resolved};
}
