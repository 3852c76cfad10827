#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod error;
mod minify;
mod parse;
mod ser;
mod tracing_macros;
mod tree;
mod value;

pub use error::{DepthError, ParseError, ParseErrorKind, PrintError, Span};
pub use minify::{minify, minify_bytes};
pub use parse::{from_slice, from_str, parse_partial};
pub use ser::{
    to_slice, to_string, to_string_pretty, to_string_with_capacity, to_vec, to_vec_pretty,
};
pub use tree::{Items, Member, Members};
pub use value::{Kind, Value};

/// Maximum container nesting depth the parser accepts.
///
/// Input nested exactly this deep parses; one level more fails with
/// [`ParseErrorKind::DepthLimitExceeded`].
pub const NESTING_LIMIT: usize = 1000;

/// Maximum recursion depth for [`Value::duplicate_deep`].
pub const DUPLICATE_LIMIT: usize = 10_000;
