//! Application-level orchestration utilities.
//!
//! This module owns review-session lifecycle control: UI layers send
//! `UiCommand`s and consume `ReviewEvent`s, and never touch the engine
//! directly.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
