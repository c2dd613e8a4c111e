//! A lightweight structural parser for Verilog built on the tagging engine.
//!
//! No grammar is involved. The [`lexicon`] classifies text into lexical
//! tokens, and the [`parser`] runs three [`Grouper`](veritag_engine::Grouper)
//! passes over them, each re-tagging recognized constructs as coarser tokens
//! for the next:
//!
//! - `layer0`: declarations, assigns, ports, parameter blocks, delays and
//!   block openers;
//! - `layer1`: assignments inside blocks and delayed `always` openers;
//! - `layer2`: module instantiations and whole `begin ... end` blocks.

#![warn(missing_docs)]

pub mod lexicon;
pub mod parser;
mod patterns;

pub use lexicon::{structure_colors, verilog_lexicon};
pub use parser::{ParseOutput, PassResult, VerilogStructuralParser, LAYER0, LAYER1, LAYER2};
