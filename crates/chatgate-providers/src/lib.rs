//! # chatgate-providers
//!
//! Inference provider implementations for chatgate.

pub mod gemini;
