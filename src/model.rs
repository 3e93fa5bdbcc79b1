pub mod client;
pub mod group;
pub mod mru;
pub mod registry;
pub mod screen;
pub mod size_hints;
pub mod title_history;

pub use client::{Client, ClientFlags, Highlight};
pub use group::{Group, GroupId};
pub use mru::MruQueue;
pub use registry::ClientRegistry;
pub use screen::{Screen, ScreenId};
pub use size_hints::SizeHints;
pub use title_history::{MAX_TITLES, TitleHistory};
