//! Content source implementations.

#[cfg(test)]
mod mock;
mod static_content;

#[cfg(test)]
pub use mock::{FailingContentSource, MockContentSource};
pub use static_content::StaticContentSource;
