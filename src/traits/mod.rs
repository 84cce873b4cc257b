//! Entity traits for Halon collections.
//!
//! Records that can be fetched by identifier implement [`Get`]; records
//! served from paged collections implement [`List`].

mod get;
mod list;

pub use get::Get;
pub use list::List;
