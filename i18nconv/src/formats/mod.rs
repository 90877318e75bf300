//! File formats read and written by i18nconv.
//!
//! - [`csv`]: the multi-language table, one row per key and one column per language.
//! - [`json`]: one nested document per language.
//!
//! Both implement [`crate::traits::Parser`].

pub mod csv;
pub mod json;
