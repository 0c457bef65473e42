use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HubError;

/// Fixed page size for catalog list requests.
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Pricing {
    #[default]
    Free,
    Freemium,
    Paid,
}

impl fmt::Display for Pricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pricing::Free => write!(f, "free"),
            Pricing::Freemium => write!(f, "freemium"),
            Pricing::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for Pricing {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Pricing::Free),
            "freemium" => Ok(Pricing::Freemium),
            "paid" => Ok(Pricing::Paid),
            _ => Err(HubError::Other(format!("invalid pricing tier: {}", s))),
        }
    }
}

pub const VALID_PRICING: &[&str] = &["free", "freemium", "paid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Recommended,
    Newest,
    Popular,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Recommended => write!(f, "recommended"),
            SortMode::Newest => write!(f, "newest"),
            SortMode::Popular => write!(f, "popular"),
        }
    }
}

impl FromStr for SortMode {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recommended" => Ok(SortMode::Recommended),
            "newest" => Ok(SortMode::Newest),
            "popular" => Ok(SortMode::Popular),
            _ => Err(HubError::InvalidSort(s.to_string())),
        }
    }
}

pub const VALID_SORTS: &[&str] = &["recommended", "newest", "popular"];

/// External profile links attached to a tool listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// A single catalog entry.
///
/// `id` is the only field with a uniqueness guarantee; everything else
/// defaults when the API omits it. Field names match the wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub category_label: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub pricing: Pricing,

    #[serde(default)]
    pub pricing_label: String,

    #[serde(default)]
    pub visits: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub is_trending: bool,

    /// Launch date as an ISO calendar date string (e.g. "2023-01-15").
    #[serde(default)]
    pub launch_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl Tool {
    /// Parse the launch date, if present and well-formed.
    pub fn launched_on(&self) -> Option<jiff::civil::Date> {
        self.launch_date.parse().ok()
    }

    /// Composite score for the recommended ordering: trending entries get
    /// a flat boost on top of their rating.
    pub fn recommended_score(&self) -> f64 {
        let boost = if self.is_trending { 10.0 } else { 0.0 };
        boost + self.rating
    }
}

/// Per-category entry count, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Re-sort a fetched list of tools in place.
///
/// Ties keep their incoming order (stable sort), so the provider's own
/// ordering survives as the tiebreaker.
pub fn sort_tools(tools: &mut [Tool], sort: SortMode) {
    match sort {
        SortMode::Newest => {
            tools.sort_by(|a, b| b.launched_on().cmp(&a.launched_on()));
        }
        SortMode::Popular => {
            tools.sort_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortMode::Recommended => {
            tools.sort_by(|a, b| {
                b.recommended_score()
                    .partial_cmp(&a.recommended_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}
