// src/lib.rs

//! allcpp event search library
//!
//! Pages through the upstream event list for a keyword and returns one
//! normalized, time-sorted record list.

pub mod error;
pub mod handler;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
