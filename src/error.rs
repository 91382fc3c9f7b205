//! Error types for header parsing and registry configuration.
//!
//! Header errors are per-request and recoverable; configuration errors are
//! wiring mistakes surfaced when protocols are registered.

use std::fmt;

/// The specific grammar rule a media type broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFault {
    /// Empty token, or nothing before the `/`
    MissingType,
    /// Nothing after the `/`
    MissingSubtype,
    /// Rejected by the media type grammar (bad token, stray characters,
    /// a parameter that is not `name=value`)
    InvalidSyntax,
    /// The same parameter name appears twice
    DuplicateParameter,
}

impl fmt::Display for MediaTypeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MediaTypeFault::MissingType => "no media type",
            MediaTypeFault::MissingSubtype => "expected token after slash",
            MediaTypeFault::InvalidSyntax => "invalid media type syntax",
            MediaTypeFault::DuplicateParameter => "duplicate parameter name",
        };
        f.write_str(msg)
    }
}

/// A preference header (or a single media type) could not be parsed.
///
/// Returned per request; HTTP callers map it to `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A comma-separated token is not a valid media type
    MalformedMediaType {
        /// The offending token, trimmed
        token: String,
        /// Which rule it broke
        fault: MediaTypeFault,
    },
    /// The `q` parameter is not a number in `[0, 1]`
    InvalidWeight {
        /// The token carrying the weight
        token: String,
        /// The raw `q` value
        value: String,
    },
    /// The header bytes are not visible ASCII
    InvalidEncoding,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedMediaType { token, fault } => {
                write!(f, "malformed media type '{}': {}", token, fault)
            }
            ParseError::InvalidWeight { token, value } => {
                write!(
                    f,
                    "invalid weight 'q={}' in '{}': must be a number between 0 and 1",
                    value, token
                )
            }
            ParseError::InvalidEncoding => {
                write!(f, "header value contains non-visible-ASCII characters")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A protocol registry was wired up incorrectly.
///
/// These are programmer mistakes made at startup. The panicking registry
/// methods abort with this message; the `try_*` variants return it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The protocol's content type is not a valid media type
    InvalidContentType {
        /// The content type as advertised
        content_type: String,
        /// Why it failed to parse
        source: ParseError,
    },
    /// Protocols must advertise a concrete type, not a range like `text/*`
    WildcardContentType {
        /// The content type as advertised
        content_type: String,
    },
    /// Another registered protocol already handles this content type
    DuplicateContentType {
        /// Normalized `type/subtype`
        content_type: String,
    },
    /// `set_default` named a content type no protocol handles
    UnregisteredDefault {
        /// The requested default
        content_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidContentType {
                content_type,
                source,
            } => {
                write!(
                    f,
                    "protocol content type '{}' is invalid: {}",
                    content_type, source
                )
            }
            ConfigError::WildcardContentType { content_type } => {
                write!(
                    f,
                    "protocol content type '{}' is a wildcard range; protocols must name a concrete type",
                    content_type
                )
            }
            ConfigError::DuplicateContentType { content_type } => {
                write!(f, "a protocol for '{}' is already registered", content_type)
            }
            ConfigError::UnregisteredDefault { content_type } => {
                write!(f, "no protocol registered for '{}'", content_type)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidContentType { source, .. } => Some(source),
            _ => None,
        }
    }
}
