use std::str::FromStr;

use content_store::ContentLocation;
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::domain::search::{IndexOptions, SearchConfig};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub content: ContentSettings,
    pub search: SearchSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Origin of the site allowed to call the API from a browser
    pub site_url: String,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentSourceKind {
    File,
    Url,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ContentSettings {
    pub source: ContentSourceKind,
    /// File path or URL of the published content catalog
    pub location: String,
}

impl ContentSettings {
    pub fn location(&self) -> ContentLocation {
        match self.source {
            ContentSourceKind::File => ContentLocation::File(self.location.clone().into()),
            ContentSourceKind::Url => ContentLocation::Url(self.location.clone()),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub default_limit: usize,
    pub max_limit: usize,
    pub min_query_length: usize,
    pub snippet_length: usize,
    #[serde(default)]
    pub warm_on_startup: bool,
    #[serde(default)]
    pub index: IndexOptions,
}

impl From<&SearchSettings> for SearchConfig {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            default_limit: settings.default_limit,
            max_limit: settings.max_limit,
            min_query_length: settings.min_query_length,
            snippet_length: settings.snippet_length,
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .expect("Failed to parse APP_ENVIRONMENT");
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("SEARCH")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
