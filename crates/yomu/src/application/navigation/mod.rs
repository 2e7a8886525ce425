mod action;
mod chunk;
mod navigator;
mod render;
mod session;

pub use action::{Action, ActionKind};
pub use chunk::{CHUNK_SIZE, chunk_bounds, chunk_count, chunk_of, cycle};
pub use navigator::{MAX_SEARCH_RESULTS, Navigator, SessionError};
pub use render::{RenderRequest, SelectOption};
pub use session::{NavigationSession, Stage};
