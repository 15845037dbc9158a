use serde::{Deserialize, Serialize};

use super::{Image, Location, RichText, Slug};

/// Fields shared by every published content record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentBase {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Option<Slug>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub location: Option<Location>,
    pub featured_image: Option<Image>,
}

impl ContentBase {
    /// Current slug, `None` for drafts without one.
    pub fn slug(&self) -> Option<&str> {
        self.slug
            .as_ref()
            .map(|slug| slug.current.as_str())
            .filter(|current| !current.is_empty())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[serde(flatten)]
    pub base: ContentBase,
    pub description: Option<RichText>,
    pub price_range: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dining {
    #[serde(flatten)]
    pub base: ContentBase,
    pub description: Option<RichText>,
    pub cuisine: Option<String>,
    pub price_range: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(flatten)]
    pub base: ContentBase,
    pub description: Option<RichText>,
    /// Things-to-do hub the activity is listed under, e.g. `outdoor-adventures`.
    pub sub_hub: Option<String>,
    pub duration: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub base: ContentBase,
    pub description: Option<RichText>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Editorial {
    #[serde(flatten)]
    pub base: ContentBase,
    pub content: Option<RichText>,
    pub published_at: Option<String>,
}
