// src/core/mod.rs

pub mod date;
pub mod identity;
pub mod sanitize;
