//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with highlighting, selected-token and error lines
//! - [`tokens`]: The token sequence with a selection cursor
//! - [`types`]: The type table, including inherited fields
//! - [`status`]: Status bar with keybindings and compile state
//!
//! Each pane module exports a stateless `render_*_pane()` function; scroll
//! offsets live in [`App`](crate::ui::App) and are passed in mutably.

pub mod source;
pub mod status;
pub mod tokens;
pub mod types;

pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use types::render_types_pane;
