//! Reusable UI components

pub mod error_dialog;
pub mod status_badge;

pub use error_dialog::render_error_dialog;
pub use status_badge::{RequestStatus, StatusBadge};
