//! # Accept Header Module
//!
//! Turns a raw, comma-delimited, q-weighted preference header into a
//! [`PreferenceSpec`] that the negotiator can query in constant time.
//!
//! ## Overview
//!
//! A header such as
//!
//! ```text
//! text/*;q=0.9, application/yaml;q=0.6, */*;q=0.1
//! ```
//!
//! is split on `,`, each token is parsed as a media type with parameters, and
//! its `q` weight (default `1.0`) is filed under one of three slots:
//!
//! - `*/*` sets the global wildcard weight
//! - `major/*` sets that major group's wildcard weight
//! - `major/minor` sets an exact weight
//!
//! A later token for the same slot overwrites an earlier one. A token without
//! a `/` (e.g. `foo`) is filed as major `foo` with an empty minor type.
//!
//! ## Errors
//!
//! Parsing is all-or-nothing: one malformed token, or a `q` outside `[0, 1]`,
//! fails the whole header with a [`ParseError`](crate::error::ParseError).

mod media_type;
mod spec;

pub use media_type::MediaType;
pub use spec::{parse, MajorGroup, PreferenceSpec};
