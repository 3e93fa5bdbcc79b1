pub mod engine;
pub mod expand;
pub mod maximize;
pub mod placement;
pub mod snap;
pub mod tile;

pub use engine::{EventResponse, LayoutCommand, LayoutEngine, LayoutSettings};
pub use snap::snap;
