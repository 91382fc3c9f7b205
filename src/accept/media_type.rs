//! Media type handling shared by Accept parsing and protocol registration.
//!
//! The grammar itself is `mime`'s. On top of it, a bare `foo` (no `/`) is
//! accepted as major `foo` with an empty minor type, a single trailing `;` is
//! tolerated, and a parameter may appear only once.

use crate::error::{MediaTypeFault, ParseError};
use mime::Mime;

/// A single parsed media type such as `application/json; charset=utf-8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    major: String,
    minor: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Parse one media type. Commas are not separators here; use
    /// [`crate::accept::parse`] for full Accept headers.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let malformed = |fault: MediaTypeFault| ParseError::MalformedMediaType {
            token: raw.trim().to_string(),
            fault,
        };

        let trimmed = raw.trim();
        let (base, params) = match trimmed.find(';') {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };
        let base = base.trim();
        let params = params.strip_suffix(';').unwrap_or(params);

        if base.is_empty() || base.starts_with('/') {
            return Err(malformed(MediaTypeFault::MissingType));
        }
        if base.ends_with('/') {
            return Err(malformed(MediaTypeFault::MissingSubtype));
        }

        let bare = !base.contains('/');
        let source = if bare {
            format!("{base}/*{params}")
        } else {
            format!("{base}{params}")
        };
        let parsed: Mime = source
            .parse()
            .map_err(|_| malformed(MediaTypeFault::InvalidSyntax))?;

        let mut collected: Vec<(String, String)> = Vec::new();
        for (name, value) in parsed.params() {
            let name = name.as_str().to_ascii_lowercase();
            if collected.iter().any(|(existing, _)| *existing == name) {
                return Err(malformed(MediaTypeFault::DuplicateParameter));
            }
            collected.push((name, unquote(value.as_str()).to_string()));
        }

        Ok(Self {
            major: parsed.type_().as_str().to_ascii_lowercase(),
            minor: if bare {
                String::new()
            } else {
                parsed.subtype().as_str().to_ascii_lowercase()
            },
            params: collected,
        })
    }

    /// Major type, e.g. `application`.
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Minor type, e.g. `json`. Empty for bare types such as `foo`.
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// `type/subtype` without parameters (just `type` when there is no subtype).
    #[must_use]
    pub fn essence(&self) -> String {
        if self.minor.is_empty() {
            self.major.clone()
        } else {
            format!("{}/{}", self.major, self.minor)
        }
    }

    /// Look up a parameter by (case-insensitive) name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// True when either half is `*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.major == "*" || self.minor == "*"
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
