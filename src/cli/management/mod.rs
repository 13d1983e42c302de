//! Local management commands
//!
//! Commands that only talk to the local `gnome-extensions` executable or
//! inspect configuration; none of them queries the catalog.

pub mod extensions;
pub mod config;
