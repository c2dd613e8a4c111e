//! Immutable source text, byte spans, and line/column resolution.
//!
//! [`SourceText`] owns the text being tagged along with a precomputed
//! line-start index, [`Span`] is a half-open byte range into it, and
//! [`Location`] is the 1-indexed line/column form used in diagnostics.

#![warn(missing_docs)]

pub mod location;
pub mod source_text;
pub mod span;

pub use location::Location;
pub use source_text::SourceText;
pub use span::Span;
