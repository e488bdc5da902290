//! Utility types and functions for the forma form library.
//!
//! This module provides:
//! - [`MultiValueDict`]: A dictionary that can hold multiple values per key.
//! - [`text`]: String utilities (identifier word-splitting, HTML escaping).

mod multi_value_dict;
pub mod text;

pub use multi_value_dict::MultiValueDict;
