//! Library components of the `hsn` command-line tool.

#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod summary;
pub mod types;
