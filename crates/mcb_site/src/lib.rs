pub mod ads;
pub mod analytics;
pub mod newsletter;
pub mod simulator;

pub use ads::{AdConfig, AdSlot, Placement, ScriptSet, ScriptTag};
pub use analytics::Analytics;
pub use newsletter::{Channel, Lead, NewsletterClient, Subscription};
pub use simulator::{simulate, CardOffer, CreditScore, Profile};

pub mod prelude {
    pub use super::{AdConfig, Analytics, NewsletterClient, Profile};
    pub use mcb_core::{Error, Result, SiteConfig};
}
