pub mod bookmark;
pub mod chapter;
pub mod document;
pub mod image;
pub mod manga;
