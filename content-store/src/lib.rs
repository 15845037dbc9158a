mod catalog;
mod models;
mod store;

pub use catalog::ContentCatalog;
pub use models::*;
pub use store::{ContentLocation, ContentStore, ContentStoreError};
