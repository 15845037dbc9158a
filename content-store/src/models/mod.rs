mod common;
mod records;

pub use common::*;
pub use records::*;
