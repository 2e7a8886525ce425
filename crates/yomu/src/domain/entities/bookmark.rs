use serde::{Deserialize, Serialize};

/// Last chapter a user saved for a manga. One per `(user_id, manga_link)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub user_id: i64,
    pub manga_link: String,
    pub chapter: usize,
}
