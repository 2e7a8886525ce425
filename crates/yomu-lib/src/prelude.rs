pub use crate::error::ExtractError;
pub use crate::extractor::Extractor;
pub use crate::models::*;
