pub mod app;
pub mod commands;
pub mod edit;
pub mod render;
pub mod watch;

pub use app::App;
pub use edit::{parse_edit, FilterEdit};
