pub mod bookmark;
pub mod document;
pub mod document_cache;
pub mod image;
pub mod image_cache;
