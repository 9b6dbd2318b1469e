// src/item.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition grades a Vinted listing can carry.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NewWithTags,
    NewWithoutTags,
    VeryGood,
    Good,
    Satisfactory,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewWithTags => "New with tags",
            Self::NewWithoutTags => "New without tags",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One marketplace listing as displayed by the dashboard.
///
/// Items are never mutated once a provider hands them over; views hold
/// shared references into the listing's record set.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub condition: Condition,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub seller: f32,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Price formatted with the display currency, e.g. `50€` or `50 USD`.
    pub fn price_label(&self, currency: &str) -> String {
        let amount = if self.price.fract() == 0.0 {
            format!("{:.0}", self.price)
        } else {
            format!("{:.2}", self.price)
        };
        match currency {
            "EUR" => format!("{}€", amount),
            other => format!("{} {}", amount, other),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, brand: &str, price: f64) -> Item {
    Item {
        id: id.to_string(),
        title: format!("{} item", brand),
        brand: brand.to_string(),
        price,
        image: String::new(),
        condition: Condition::VeryGood,
        location: "Paris".to_string(),
        seller: 4.0,
        time: "5m ago".to_string(),
        url: "https://www.vinted.de/".to_string(),
        tags: Vec::new(),
    }
}
