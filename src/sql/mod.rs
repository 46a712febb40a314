//! SQL statement text. Values are always bound as parameters.

mod entries;
pub use entries::*;
