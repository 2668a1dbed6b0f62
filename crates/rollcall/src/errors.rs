//! Shared error types and utilities for the rollcall project.
pub use color_eyre::Report;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors produced by the activity directory when a signup or unregister
/// request cannot be honored. All of these surface to the client as a
/// 400 response with the error's display text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found")]
    NotFound(String),
    #[error("{email} is already signed up for {activity}")]
    AlreadySignedUp { email: String, activity: String },
    #[error("{email} is not signed up for {activity}")]
    NotSignedUp { email: String, activity: String },
}
