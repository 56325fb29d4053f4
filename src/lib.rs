// src/lib.rs

//! jobscout: daily entry-level job search digest

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
