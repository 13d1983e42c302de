//! Core functionality modules
//!
//! This module contains the catalog and installation pipeline:
//! - `shell`: Detection of the installed GNOME Shell version
//! - `catalog`: Paginated catalog search and the per-command index
//! - `acquire`: Version-aware download of extension archives
//! - `manager`: The external `gnome-extensions` executable

pub mod acquire;
pub mod catalog;
pub mod manager;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_support;
