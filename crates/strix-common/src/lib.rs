//! Common types and utilities for the strix compiler.
//!
//! This crate provides foundational types shared across the strix crates:
//! - Diagnostic categories, codes, and message templates
//! - `Diagnostic` values and message formatting

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message, get_message_template,
};
