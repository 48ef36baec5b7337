//! Reminder error types.
//!
//! Messages are shown to the user verbatim, so `Display` and `user_message()`
//! return the same text.

use thiserror::Error;

/// Form validation failure. Only the first failing field is reported,
/// checked in the order title, date, time, color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be 30 characters or less")]
    TitleTooLong,

    #[error("Date is required")]
    DateRequired,

    #[error("Date must be a valid date")]
    DateInvalid,

    #[error("Time is required")]
    TimeRequired,

    #[error("Time must be in HH:MM format (24-hour)")]
    TimeFormatInvalid,

    #[error("Color is required")]
    ColorRequired,

    #[error("Color must be a valid hex color (e.g., #FF0000 or #F00)")]
    ColorFormatInvalid,
}

impl ValidationError {
    /// Form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::DateRequired | Self::DateInvalid => "date",
            Self::TimeRequired | Self::TimeFormatInvalid => "time",
            Self::ColorRequired | Self::ColorFormatInvalid => "color",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Reminder not found")]
    NotFound(u64),
}

impl ReminderError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the caller can fix this by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
