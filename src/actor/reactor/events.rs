pub mod command;
pub mod window;
