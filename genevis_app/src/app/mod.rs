//! App state and window backend

pub mod defaults;
mod minifb_window;
mod state;

pub use minifb_window::MinifbWindow;
pub use state::{AppState, ClipCommand, InputFrame};
