// src/lib.rs

pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod service;
