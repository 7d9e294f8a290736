//! SQLite backend for the parameters/output toolbox.
//!
//! [`ParamsStore`] owns a single blocking [`rusqlite::Connection`] and
//! exposes validated reads over `<family>_parameters` / `<family>_output`
//! tables, plus a confirmed delete that also removes the artifact files an
//! output row points at.

mod artifacts;
mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::ParamsStore;
