//! Core domain logic for the week planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: calendar items with minute-granularity times of day
//! - Layout: computing day-column geometry so overlapping events render
//!   side by side
//! - Validated value types (`TimeOfDay` and identifier newtypes) built once
//!   at the ingestion boundary

mod layout;
pub mod event;
pub mod types;

pub use event::{Category, DEFAULT_COLOR, Event};
pub use layout::{EventGeometry, LayoutConfig, LayoutEvent, lay_out_day};
pub use types::{CategoryId, EventId, TimeOfDay, ValidationError};
