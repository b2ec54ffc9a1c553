use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading the listing fixture.
///
/// Any of these is fatal at startup: the feed cannot render without data.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to read listings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid listings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share the same `id`; lookups by id must be unambiguous.
    #[error("Duplicate listing id '{0}' in fixture")]
    DuplicateId(String),

    #[error("Listings file too large: {0}")]
    TooLarge(String),

    #[error("Listings fixture contains no listings")]
    Empty,
}

// ============================================================================
// Listing Record
// ============================================================================

/// A single rentable property from the bundled fixture.
///
/// Nullable fields in the source data deserialize to `None` (or the type's
/// default) instead of failing the whole load. Unknown keys are ignored so
/// full dataset exports load as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub listing_url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub smart_location: String,

    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub guests_included: Option<u32>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<f32>,
    /// Review score on a 0-100 scale.
    #[serde(default)]
    pub review_scores_rating: Option<u32>,
    #[serde(default)]
    pub number_of_reviews: u32,

    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub medium_url: Option<String>,
    #[serde(default)]
    pub xl_picture_url: Option<String>,

    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub host_since: Option<NaiveDate>,
    #[serde(default)]
    pub host_picture_url: Option<String>,

    /// Category names this listing is filed under.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Listing {
    /// Star rating on a 0-5 scale (`review_scores_rating / 20`).
    pub fn star_rating(&self) -> Option<f32> {
        self.review_scores_rating.map(|r| r as f32 / 20.0)
    }

    /// Human location label, e.g. "Le Marais, Paris".
    pub fn location(&self) -> String {
        match (self.street.as_deref(), self.city.as_deref()) {
            (Some(street), Some(city)) if !street.contains(city) => {
                format!("{}, {}", street, city)
            }
            (Some(street), _) => street.to_string(),
            (None, Some(city)) => city.to_string(),
            (None, None) => self.smart_location.clone(),
        }
    }

    /// Whether this listing is filed under `category` (case-insensitive).
    pub fn is_in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Text used by the share action.
    pub fn share_message(&self) -> Option<String> {
        self.listing_url.as_deref().map(|url| {
            format!(
                "Hey, look at this place that i found on Airbnb: \n{}",
                url
            )
        })
    }
}
