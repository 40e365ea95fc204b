//! Application module: the shell model used by the TUI and runtime.
//!
//! `App` lives in `app::model`, the modal forms in `app::prompt`, and the
//! effects of each key on content and playback in `app::actions`.

pub mod actions;
mod model;
mod prompt;

pub use model::*;
pub use prompt::*;

#[cfg(test)]
mod tests;
