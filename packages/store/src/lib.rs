//! Pawdeck Store - client-side data layer for the admin console
//!
//! Three concerns live here: a keyed query cache that makes repeated
//! reads of the same collection free until a mutation invalidates them,
//! a debouncer that collapses bursts of keystrokes into one request,
//! and in-memory collections backing the screens that have no API yet.

pub mod cache;
pub mod debounce;
pub mod error;
pub mod mock;

pub use cache::{Collection, QueryCache, QueryKey};
pub use debounce::Debouncer;
pub use error::StoreError;
pub use mock::{MockCollection, MockPage, MockRecord};
