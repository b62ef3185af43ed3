//! Content service payloads.

use serde::{Deserialize, Serialize};

/// A city or area products are grouped under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Location id
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: Option<String>,
    /// ISO country code
    pub country_code: Option<String>,
    /// Nested locations, e.g. districts of a city
    #[serde(default)]
    pub sub_locations: Vec<Location>,
}

impl Location {
    /// Find a location by id in this location or any nested one.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.sub_locations.iter().find_map(|child| child.find(id))
    }
}

/// Editorial content of a product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProduct {
    /// Product id, shared with the inventory service
    pub id: String,
    /// Display name
    pub name: String,
    /// Product type, e.g. `show`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// One-line summary
    pub short_description: Option<String>,
    /// Long description, may contain HTML
    pub description: Option<String>,
    /// Venue the product plays at
    pub venue_id: Option<String>,
    /// Location the product is listed under
    pub location_id: Option<String>,
    /// Running time in minutes
    pub duration_minutes: Option<u32>,
    /// Minimum age in years
    pub age_restriction: Option<u32>,
    /// Promotional images
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A promotional image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Absolute URL
    pub url: String,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Usage, e.g. `square` or `landscape`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
