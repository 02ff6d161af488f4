//! Master Account Guides core library
//!
//! Taxonomy, flat-file JSON state stores, visit logging, catalog
//! synchronization, and the search filter contract shared with the client.

pub mod catalog;
pub mod paths;
pub mod search;
pub mod storage;
pub mod taxonomy;
