//! Reminder model and in-memory reminder store.
//!
//! Reminders are built from raw form fields, validated, optionally annotated
//! with a weather label, and kept in insertion order by [`ReminderStore`].

pub mod error;
pub mod reminder;
pub mod samples;
pub mod store;

pub use error::{ReminderError, ValidationError};
pub use reminder::{validate, CityInput, Reminder, ReminderDraft, TITLE_MAX_CHARS};
pub use store::ReminderStore;
