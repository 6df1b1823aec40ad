//! Input adapters: translate window and device events into viewer actions.

pub mod gui;
