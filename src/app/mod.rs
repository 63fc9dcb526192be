//! Line-mode front end: input handling, event rendering, and action dispatch.

pub mod action;
pub mod commands;
pub mod event;
pub mod handler;
pub mod state;
