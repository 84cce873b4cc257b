//! Halon API model types.

mod records;
mod revision;

pub use records::*;
pub use revision::*;

pub(crate) use revision::revision_path;
