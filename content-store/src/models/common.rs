use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slug {
    #[serde(default)]
    pub current: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageAsset {
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub asset: ImageAsset,
    pub alt: Option<String>,
    pub mock_url: Option<String>,
}

impl Image {
    /// The resolved image URL, if the record carries one.
    pub fn url(&self) -> Option<&str> {
        self.asset
            .url
            .as_deref()
            .or(self.mock_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Long-form text: either a plain string or a Portable Text block array.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RichText {
    Plain(String),
    Blocks(Vec<Block>),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    #[serde(rename = "_type", default)]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<Span>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub text: Option<String>,
}

impl RichText {
    /// Flattens the text into a single string. Only `block` entries contribute;
    /// embedded images and other custom blocks are skipped.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter(|block| block.kind == "block")
                .map(|block| {
                    block
                        .children
                        .iter()
                        .filter_map(|span| span.text.as_deref())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
