// src/lib.rs

//! Incident Reporter Library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
pub mod view;
