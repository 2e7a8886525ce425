use serde::{Deserialize, Serialize};

/// A chapter link in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterInfo {
    pub path: String,
    pub title: String,
}
