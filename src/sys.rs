//! The window system seam and its X11 implementation.

pub mod geometry;
pub mod window_system;
pub mod x11;
