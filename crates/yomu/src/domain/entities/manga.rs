use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manga {
    /// Catalog path, also the identity of the manga
    pub link: String,
    pub name: String,
    pub cover: String,
}

impl From<yomu_lib::models::MangaInfo> for Manga {
    fn from(m: yomu_lib::models::MangaInfo) -> Self {
        Self {
            link: m.path,
            name: m.title,
            cover: m.cover_url,
        }
    }
}
