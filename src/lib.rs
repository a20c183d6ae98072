// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;
pub mod review;
pub mod store;

pub mod browser;
pub mod specs;

pub mod progress;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;
