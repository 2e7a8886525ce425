use serde::{Deserialize, Serialize};

/// A manga as it appears on a catalog page, before the service applies any policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MangaInfo {
    pub path: String,
    pub title: String,
    pub cover_url: String,
}
