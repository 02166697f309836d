//! Configuration and request/response types shared by all proxy functions

pub mod config;
pub mod models;
