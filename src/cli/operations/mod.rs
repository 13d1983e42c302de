//! Operations that download from the catalog
//!
//! This module contains the commands that fetch extension archives:
//! installing, upgrading, and saving an archive without installing it.

pub mod install;
pub mod upgrade;
pub mod download;

