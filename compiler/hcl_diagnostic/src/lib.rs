//! Diagnostics for the HCL native syntax parser.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A severity
//! - A short summary and a full detail sentence
//! - A subject range, and optionally a broader context range
//!
//! Diagnostics are plain values. The parser never aborts on malformed input;
//! it returns a [`Diagnostics`] list next to whatever tree it could build.

mod diagnostic;
mod diagnostics;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use diagnostics::Diagnostics;
pub use error_code::ErrorCode;
