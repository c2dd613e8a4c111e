//! Diagnostic creation, severity management, and terminal rendering.
//!
//! Structural mismatches found while grouping tokens are not fatal: they are
//! reported as [`Diagnostic`] values into a thread-safe [`DiagnosticSink`]
//! and scanning continues. A [`DiagnosticRenderer`] formats them for output.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
