//! Desktop UI
//!
//! A single eframe window hosting the drawing pad, its toolbar and the
//! prediction readout.

pub mod app;
pub mod components;
pub mod shortcuts;
pub mod state;
pub mod theme;
pub mod views;

pub use app::run_app;
