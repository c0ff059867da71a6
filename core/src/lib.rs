//! Core components for canonicalizing and signing query-style API requests.
//!
//! This crate provides the foundational types shared by the querysign
//! service crates.
//!
//! ## Overview
//!
//! - **Value**: the parameter tree callers build before a request is
//!   flattened into its wire form.
//! - **Key mapping**: recursive, table-aware key renaming between
//!   snake_case and CamelCase (see [`key_map`]).
//! - **Context**: a container for the environment that credential providers
//!   and config loaders read from.
//! - **Traits**: [`ProvideCredential`] for loading credentials and
//!   [`SigningCredential`] for validating cached ones.
//!
//! ## Example
//!
//! ```
//! use querysign_core::key_map::map_to_wire_case;
//! use querysign_core::Value;
//!
//! let params = Value::from([("group_name", "web"), ("vpc_id", "vpc-1")]);
//! let wire = map_to_wire_case(params, None);
//!
//! assert_eq!(wire, Value::from([("GroupName", "web"), ("VpcId", "vpc-1")]));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod key_map;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};

mod value;
pub use value::{Mapping, Value};
