pub mod extractor_info;
pub use extractor_info::*;

pub mod manga_info;
pub use manga_info::*;

pub mod chapter_info;
pub use chapter_info::*;

pub mod version;
pub use version::*;
