//! # represent
//!
//! **represent** performs HTTP content negotiation: given a client's weighted
//! `Accept` header and a set of registered serialization formats
//! ("protocols"), it picks the single best format for a response, or reports
//! that none is acceptable. The mirror path picks a decoder for a request
//! body from its `Content-Type`.
//!
//! ## Architecture
//!
//! - **[`accept`]** - Accept header parser producing a [`PreferenceSpec`]
//! - **[`cache`]** - Bounded LRU of parsed headers for the request hot path
//! - **[`negotiate`]** - Weighting and tie-break selection
//! - **[`registry`]** - Registered protocols, the default, and concurrency
//! - **[`protocol`]** - The [`Protocol`] trait plus JSON, XML, YAML and msgpack formats
//! - **[`message`]** - Decode/encode helpers over `http` requests and responses
//! - **[`runtime_config`]** / **[`logging`]** - Environment configuration
//!
//! ### Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Handler
//!     participant Registry
//!     participant Cache as SpecCache
//!     participant Parser as accept::parse
//!     participant Negotiate as negotiate::select
//!
//!     Handler->>Registry: match_header("text/*;q=0.9, application/yaml;q=0.6")
//!     Registry->>Cache: get_or_parse(raw)
//!     alt cache miss
//!         Cache->>Parser: parse(raw)
//!         Parser-->>Cache: PreferenceSpec
//!     end
//!     Cache-->>Registry: Arc<PreferenceSpec>
//!     Registry->>Negotiate: select(spec, snapshot, default)
//!     Negotiate-->>Registry: winner index
//!     Registry-->>Handler: Some(protocol) / None
//! ```
//!
//! ## Selection Rules
//!
//! Each protocol is weighted by the first of: exact `type/subtype` entry,
//! `type/*` entry, `*/*` entry. The highest weight wins; a high-q wildcard
//! beats a low-q exact match. Ties go to the configured default when it is
//! among them, otherwise to the earliest-registered protocol.
//!
//! ## Quick Start
//!
//! ```rust
//! use represent::protocol::{JsonProtocol, YamlProtocol};
//! use represent::registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! registry.register(Arc::new(JsonProtocol));
//! registry.register(Arc::new(YamlProtocol));
//! registry.set_default("application/yaml");
//!
//! // No preference: the default wins the tie
//! let chosen = registry.match_header("").unwrap().unwrap();
//! assert_eq!(chosen.content_type(), "application/yaml");
//!
//! // Nothing acceptable
//! assert!(registry.match_header("text/html").unwrap().is_none());
//!
//! // Malformed header
//! assert!(registry.match_header("text/html;q=1.5").is_err());
//! ```
//!
//! ## Process-wide Registry
//!
//! The free functions [`register`], [`set_default`], [`match_header`] and
//! [`match_content_type`] operate on [`registry::global()`], configured from
//! `REPRESENT_SPEC_CACHE` / `REPRESENT_SPEC_CACHE_SIZE`.

pub mod accept;
pub mod cache;
pub mod cli;
pub mod error;
pub mod logging;
pub mod message;
pub mod negotiate;
pub mod protocol;
pub mod registry;
pub mod runtime_config;

pub use accept::{MediaType, PreferenceSpec};
pub use error::{ConfigError, MediaTypeFault, ParseError};
pub use message::NegotiationError;
pub use protocol::{CodecError, Protocol};
pub use registry::Registry;

use std::sync::Arc;

/// Register a protocol on the process-wide registry.
///
/// # Panics
///
/// Panics if the protocol's content type is invalid, a wildcard, or already
/// registered.
pub fn register(protocol: Arc<dyn Protocol>) {
    registry::global().register(protocol);
}

/// Set the default protocol of the process-wide registry.
///
/// # Panics
///
/// Panics if no protocol for `content_type` is registered.
pub fn set_default(content_type: &str) {
    registry::global().set_default(content_type);
}

/// Choose a protocol for an Accept header using the process-wide registry.
pub fn match_header(raw: &str) -> Result<Option<Arc<dyn Protocol>>, ParseError> {
    registry::global().match_header(raw)
}

/// Choose a decoder for a Content-Type using the process-wide registry.
pub fn match_content_type(content_type: &str) -> Result<Option<Arc<dyn Protocol>>, ParseError> {
    registry::global().match_content_type(content_type)
}
