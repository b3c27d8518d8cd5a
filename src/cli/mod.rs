pub mod app;
pub mod commands;
pub mod display;

pub use app::App;
pub use commands::{Cli, Commands};
pub use display::{render_board, supports_unicode};
