//! # CLI Module
//!
//! Command-line front end for trying out negotiation against the built-in
//! protocols (`application/json`, `application/xml`, `application/yaml`, then
//! `application/msgpack`).
//!
//! ## Commands
//!
//! ### `negotiate`
//!
//! Print the content type that would be chosen for an Accept header:
//!
//! ```bash
//! represent negotiate --accept "text/*;q=0.9, application/yaml;q=0.6"
//! represent negotiate --accept "*/*" --default application/yaml
//! ```
//!
//! ### `convert`
//!
//! Decode a document with the protocol matching `--content-type` and
//! re-encode it with the one the Accept header prefers:
//!
//! ```bash
//! represent convert --content-type application/json --accept application/yaml < pet.json
//! ```
//!
//! Failures exit non-zero with the HTTP status a server would have answered.

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
