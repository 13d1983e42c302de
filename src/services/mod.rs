//! Service layer
//!
//! `SimpleServices` owns the loaded configuration and builds the catalog
//! client, downloader and extension manager each command needs. The shell
//! version is only probed when a command actually talks to the catalog.

pub mod simple_container;

pub use simple_container::SimpleServices;
