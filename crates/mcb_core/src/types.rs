use serde::{Deserialize, Serialize};

/// Words per minute used when deriving `reading_time`.
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Body text. May carry paragraph breaks, `##`/`###` headers and `-` bullets.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Display string or ISO timestamp, passed through as received.
    pub published_at: String,
    pub reading_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_info: Option<CardInfo>,
}

/// Extended card metadata shown next to card reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub name: String,
    pub color: String,
    pub annual_fee: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Estimated reading time for a body of text, formatted as `"<N> min"`.
///
/// Counts whitespace separated words at [`WORDS_PER_MINUTE`] and rounds up,
/// never going below one minute.
pub fn reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["palavra"; n].join(" ")
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(&words(400)), "2 min");
        assert_eq!(reading_time(&words(401)), "3 min");
        assert_eq!(reading_time(&words(200)), "1 min");
        assert_eq!(reading_time("uma"), "1 min");
        assert_eq!(reading_time(""), "1 min");
        assert_eq!(reading_time("   \n\t "), "1 min");
    }

    #[test]
    fn test_reading_time_ignores_markup_spacing() {
        let body = format!("## Título\n\n{}\n\n- item\n", words(398));
        // "##", "Título", 398 words, "-", "item"
        assert_eq!(reading_time(&body), "3 min");
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let article = Article {
            id: "1".to_string(),
            slug: "teste".to_string(),
            title: "Teste".to_string(),
            excerpt: String::new(),
            content: String::new(),
            image: None,
            author: None,
            published_at: "10 Fev 2026".to_string(),
            reading_time: "1 min".to_string(),
            category: None,
            tags: vec![],
            card_info: Some(CardInfo {
                name: "Cartão".to_string(),
                color: "#000000".to_string(),
                annual_fee: "Grátis".to_string(),
                benefits: vec![],
            }),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["publishedAt"], "10 Fev 2026");
        assert_eq!(json["readingTime"], "1 min");
        assert_eq!(json["cardInfo"]["annualFee"], "Grátis");
        assert!(json.get("image").is_none());
    }
}
