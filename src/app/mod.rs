//! Text front end: command parsing, the controller loop and screen rendering.

pub mod command;
pub mod controller;
pub mod render;

pub use command::{Command, CommandParser};
pub use controller::App;
