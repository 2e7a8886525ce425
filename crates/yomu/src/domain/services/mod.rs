pub mod bookmark;
pub mod catalogue;
pub mod image;
