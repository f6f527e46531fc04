// ==========================================
// Product Import - application layer
// ==========================================
// CLI parsing, wiring, report rendering
// ==========================================

pub mod cli;
pub mod render;
pub mod state;

pub use cli::{Cli, OutputFormat};
pub use render::{render, render_table};
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
