use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub link: String,
    pub name: String,
}

impl From<yomu_lib::models::ChapterInfo> for Chapter {
    fn from(ch: yomu_lib::models::ChapterInfo) -> Self {
        Self {
            link: ch.path,
            name: ch.title,
        }
    }
}
