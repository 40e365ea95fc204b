//! Audio playback: the controller, the device adapter and their shared types.
//!
//! `PlaybackController` owns one `OutputDevice` and is the only component
//! allowed to command it. `ThreadedDevice` is the rodio-backed device used at
//! runtime; tests drive the controller with a scripted device instead.

mod controller;
mod device;
mod sink;
mod thread;
mod types;

pub use controller::*;
pub use device::*;
pub use types::*;
