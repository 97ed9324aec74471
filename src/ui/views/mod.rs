//! Window sections

pub mod pad;
pub mod prediction;
pub mod toolbar;

pub use pad::render_pad;
pub use prediction::render_prediction;
pub use toolbar::render_toolbar;
