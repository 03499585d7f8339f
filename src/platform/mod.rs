//! Platform input layer
//!
//! Browser key events (or a scripted driver on native) land in [`InputState`];
//! the host samples it into a `TickInput` once per fixed tick.

pub mod input;

pub use input::{InputState, Key, key_from_code};
