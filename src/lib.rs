//! cam: list and select cameras, then wait for an interrupt.
//!
//! The library half exposes the pieces the binary is built from so they can
//! be exercised in isolation.

pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod event_loop;
pub mod signal;
