// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod logger;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod trades;
