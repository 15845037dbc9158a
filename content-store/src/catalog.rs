use serde::{Deserialize, Serialize};

use crate::models::{Accommodation, Activity, Dining, Editorial, Event};

/// Every published content array, as exported by the site build.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentCatalog {
    #[serde(default)]
    pub accommodations: Vec<Accommodation>,
    #[serde(default)]
    pub dining: Vec<Dining>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub editorials: Vec<Editorial>,
}

impl ContentCatalog {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Total number of records across all content arrays.
    pub fn len(&self) -> usize {
        self.accommodations.len()
            + self.dining.len()
            + self.activities.len()
            + self.events.len()
            + self.editorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
