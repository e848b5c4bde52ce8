//! Pawdeck TUI - Terminal user interface for the Pawdeck admin console
//!
//! Every screen is the same shape: a table over one collection, a
//! search box, and modal overlays for create, edit, filter, and
//! confirm-delete. Remote collections read through the query cache and
//! are invalidated after mutations; the mock-only screens run the same
//! flow against in-memory data.

pub mod app;
pub mod events;
pub mod screens;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::AppState;
