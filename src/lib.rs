//! managed-favs: builds and reads managed browser favorites.
//!
//! Converts a tree of favorites and one-level folders to and from the JSON
//! array used by Group Policy and the Intune Settings Catalog, and the XML
//! property list used by Intune macOS profiles.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
