// src/lib.rs
// #![allow(dead_code)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod error;
pub mod config;
pub mod core;
pub mod specs;
pub mod showdown;

pub mod batch;
pub mod csv;
pub mod file;
pub mod progress;
pub mod report;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use showdown::{Pipeline, RawBlock, Round};
