//! Revive ad server integration.
//!
//! Revive is consumed as an opaque async script; this module only works out
//! which script to load and which zones each placement maps to.

use serde::Serialize;
use mcb_core::config::{ReviveZones, SiteConfig};

/// Protocol-relative URL of Revive's async loader for a configured host.
pub fn script_url(revive_url: &str) -> Option<String> {
    let host = revive_url.trim();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    let host = host.strip_prefix("//").unwrap_or(host).trim_end_matches('/');

    if host.is_empty() {
        None
    } else {
        Some(format!("//{}/delivery/asyncjs.php", host))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptTag {
    pub src: String,
    #[serde(rename = "async")]
    pub is_async: bool,
}

impl ScriptTag {
    pub fn async_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            is_async: true,
        }
    }

    pub fn to_html(&self) -> String {
        let async_attr = if self.is_async { " async" } else { "" };
        format!("<script src=\"{}\"{}></script>", escape_attr(&self.src), async_attr)
    }
}

/// Scripts to place in a page head. Each `src` appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSet {
    tags: Vec<ScriptTag>,
}

impl ScriptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, src: &str) -> bool {
        self.tags.iter().any(|t| t.src == src)
    }

    /// Adds `tag` unless a script with the same `src` is already present.
    pub fn insert(&mut self, tag: ScriptTag) -> bool {
        if self.contains(&tag.src) {
            tracing::debug!("script already loaded: {}", tag.src);
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn tags(&self) -> &[ScriptTag] {
        &self.tags
    }

    pub fn to_html(&self) -> String {
        self.tags.iter().map(ScriptTag::to_html).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Header,
    Sidebar,
    /// In-article slot, numbered from 1 down the article body.
    InArticle(u8),
    StickyFooter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdSlot {
    pub element_id: String,
    pub zone_id: String,
    pub width: u32,
    pub height: u32,
    pub placeholder: String,
    /// `false` renders a placeholder box instead of a Revive container.
    pub live: bool,
}

impl AdSlot {
    pub fn to_html(&self, revive_id: Option<&str>) -> String {
        if !self.live {
            return format!(
                "<div id=\"{}\" class=\"ad-spot\" style=\"width:{}px;min-height:{}px\">{}</div>",
                escape_attr(&self.element_id),
                self.width,
                self.height,
                self.placeholder
            );
        }
        let revive_attr = revive_id
            .map(|id| format!(" data-revive-id=\"{}\"", escape_attr(id)))
            .unwrap_or_default();
        format!(
            "<ins id=\"{}\" class=\"revive-ad-container\" data-revive-zoneid=\"{}\"{}></ins>",
            escape_attr(&self.element_id),
            escape_attr(&self.zone_id),
            revive_attr
        )
    }
}

#[derive(Debug, Clone)]
pub struct AdConfig {
    pub script: Option<String>,
    pub revive_id: Option<String>,
    pub zones: ReviveZones,
}

impl AdConfig {
    pub fn from_site(site: &SiteConfig) -> Self {
        let script = site.revive_url.as_deref().and_then(script_url);
        if script.is_none() {
            tracing::warn!("Revive URL not configured, ads render as placeholders");
        }
        Self {
            script,
            revive_id: site.revive_id.clone(),
            zones: site.revive_zones.clone(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.script.is_some()
    }

    /// Registers the Revive loader on a page, once.
    pub fn install(&self, scripts: &mut ScriptSet) -> bool {
        match &self.script {
            Some(src) => scripts.insert(ScriptTag::async_src(src.clone())),
            None => false,
        }
    }

    pub fn slot(&self, placement: Placement) -> AdSlot {
        let (zone_id, width, height, placeholder) = match placement {
            Placement::Header => (self.zones.header.clone(), 728, 90, "PUBLICIDADE"),
            Placement::Sidebar => (self.zones.sidebar.clone(), 300, 250, "ANÚNCIO"),
            Placement::InArticle(position) => {
                (format!("{}-{}", self.zones.in_article_1, position), 650, 100, "Anúncio")
            }
            Placement::StickyFooter => (self.zones.sticky_footer.clone(), 320, 50, ""),
        };
        AdSlot {
            element_id: format!("ad-zone-{}", zone_id),
            zone_id,
            width,
            height,
            placeholder: placeholder.to_string(),
            live: self.is_live(),
        }
    }

    pub fn slots(&self) -> Vec<AdSlot> {
        [
            Placement::Header,
            Placement::Sidebar,
            Placement::InArticle(1),
            Placement::InArticle(2),
            Placement::StickyFooter,
        ]
        .into_iter()
        .map(|p| self.slot(p))
        .collect()
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
