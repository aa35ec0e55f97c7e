//! RuleIt Core - the interactive rule-token editor
//!
//! In-memory model of a boolean rule as an ordered token sequence, plus the
//! state machine that lets a caller insert, edit, and delete tokens in place
//! while keeping the sequence well-formed enough to submit for update.
//!
//! This crate is pure and synchronous: no I/O, no async, no rendering. The
//! network boundary lives in `ruleit-client`; any UI sits outside both and
//! drives the editor one discrete action at a time.
//!
//! # Quick Start
//!
//! ```
//! use ruleit_core::TokenEditor;
//!
//! // Open a stored rule for editing.
//! let mut editor = TokenEditor::from_tokens(vec![
//!     "age".to_string(),
//!     ">".to_string(),
//!     "18".to_string(),
//! ]);
//!
//! // Change "18" to "21".
//! editor.begin_edit(2);
//! editor.edit_text("21");
//! editor.commit();
//!
//! // Insert a conjunction at the tail gap, one token per action.
//! for token in ["AND", "color", "=", "blue"] {
//!     let tail = editor.gap_count() - 1;
//!     editor.gap_input(tail, token);
//!     editor.commit_gap(tail);
//! }
//!
//! assert_eq!(editor.rule_text(), "age > 21 AND color = blue");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, missing_debug_implementations)]

pub mod editor;
pub mod error;
pub mod expr;
pub mod token;

pub use editor::{EditState, TokenEditor};
pub use error::{CoreError, Result};
pub use expr::{ExpressionBuilder, Operator, RuleExpression};
pub use token::TokenSequence;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
