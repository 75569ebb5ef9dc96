//! This is a library that provides objects and functionality to keep a list of named
//! locations in a database and to compute the distance and direction from a device's
//! current position to any of them.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

pub mod core;
pub mod geo;
pub mod location;
pub mod store;
pub mod tracker;

pub use crate::core::database::Database;
pub use crate::core::error::Error;
pub use crate::core::error::Result;

/// A serde helper for html forms, which submit an empty string for a field that the
/// user left blank
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s)
            .map_err(serde::de::Error::custom)
            .map(Some),
    }
}
