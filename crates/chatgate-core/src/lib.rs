//! # chatgate-core
//!
//! Core types, traits, configuration, and error handling for chatgate.

pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod text;
pub mod traits;
