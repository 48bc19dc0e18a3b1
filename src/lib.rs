// src/lib.rs
//! todo library.

#![deny(missing_docs)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod line;
pub mod logging;
pub mod report;
pub mod store;
pub mod todos;
