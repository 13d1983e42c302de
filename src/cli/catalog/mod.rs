//! Read-only catalog commands
//!
//! Searching the catalog and showing details of a single extension.

pub mod search;
pub mod about;
