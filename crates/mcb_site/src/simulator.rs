//! Card-limit simulator: a monthly-spend multiplier adjusted by credit
//! profile, applied to every card in the catalogue.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use mcb_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditScore {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

impl CreditScore {
    pub fn multiplier(self) -> f64 {
        match self {
            CreditScore::Excellent => 3.0,
            CreditScore::Good => 2.5,
            CreditScore::Fair => 1.5,
            CreditScore::Poor => 2.0,
        }
    }
}

impl FromStr for CreditScore {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(CreditScore::Excellent),
            "good" => Ok(CreditScore::Good),
            "fair" => Ok(CreditScore::Fair),
            "poor" => Ok(CreditScore::Poor),
            other => Err(Error::Validation(format!(
                "unknown credit score {:?} (expected excellent, good, fair or poor)",
                other
            ))),
        }
    }
}

impl fmt::Display for CreditScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreditScore::Excellent => "excellent",
            CreditScore::Good => "good",
            CreditScore::Fair => "fair",
            CreditScore::Poor => "poor",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub monthly_spend: f64,
    #[serde(default)]
    pub score: CreditScore,
    #[serde(default)]
    pub employed: bool,
    #[serde(default)]
    pub has_income: bool,
}

impl Profile {
    pub fn multiplier(&self) -> f64 {
        let mut multiplier = self.score.multiplier();
        if self.employed {
            multiplier *= 1.2;
        }
        if self.has_income {
            multiplier *= 1.1;
        }
        multiplier
    }

    pub fn limit(&self) -> Result<f64> {
        if !self.monthly_spend.is_finite() || self.monthly_spend < 0.0 {
            return Err(Error::Validation(format!(
                "monthly spend must be a non-negative amount, got {}",
                self.monthly_spend
            )));
        }
        Ok(self.monthly_spend * self.multiplier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub name: &'static str,
    pub color: &'static str,
    pub fee: &'static str,
    pub score: u8,
}

pub const CATALOGUE: [Card; 5] = [
    Card { name: "Nubank", color: "#820AD1", fee: "Grátis", score: 95 },
    Card { name: "Inter", color: "#FF7A00", fee: "Grátis", score: 88 },
    Card { name: "C6 Bank", color: "#000000", fee: "Grátis", score: 85 },
    Card { name: "Santander", color: "#EC0000", fee: "R$ 530/ano", score: 82 },
    Card { name: "Itaú", color: "#FD6D00", fee: "R$ 590/ano", score: 80 },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardOffer {
    pub name: String,
    pub color: String,
    pub limit: f64,
    pub limit_display: String,
    pub fee: String,
    pub score: u8,
}

/// One offer per catalogue card, all carrying the simulated limit.
pub fn simulate(profile: &Profile) -> Result<Vec<CardOffer>> {
    let limit = profile.limit()?;
    let display = format_brl(limit);

    Ok(CATALOGUE
        .iter()
        .map(|card| CardOffer {
            name: card.name.to_string(),
            color: card.color.to_string(),
            limit,
            limit_display: display.clone(),
            fee: card.fee.to_string(),
            score: card.score,
        })
        .collect())
}

/// Whole reais with pt-BR digit grouping: `R$ 12.345`.
pub fn format_brl(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}R$ {}", sign, grouped)
}
