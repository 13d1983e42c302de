//! Command Line Interface module
//!
//! This module contains all CLI commands organized into logical submodules:
//! - `catalog`: Read-only catalog queries (search, about)
//! - `operations`: Commands that download archives (install, upgrade, download)
//! - `management`: Local extension manager commands and configuration

pub mod catalog;
pub mod operations;
pub mod management;
