//! Core types for the parameters/output toolbox.
//!
//! This crate is deliberately free of database dependencies. It defines the
//! vocabulary shared by the SQLite accessor and the command-line tool: table
//! kinds, dynamically-typed values and rows, selectors and the filter clauses
//! built from them, and the interactive confirmation used before deletes.

pub mod error;
pub mod kind;
pub mod lookup;
pub mod prompt;
pub mod selector;
pub mod value;

pub use error::{Error, Result};
pub use kind::{KindScope, TableKind, ROWID};
pub use lookup::{CleanOutcome, ParamLookup};
pub use prompt::{Confirm, TerminalPrompt};
pub use selector::{FilterClause, Selector};
pub use value::{Row, Value};
