//! Platform abstraction layer
//!
//! The host owns the devices; the simulation only reads button state through
//! `InputPort`.

pub mod input;

pub use input::{Button, EdgeDetector, InputPort, InputSnapshot};
