//! # Negotiation
//!
//! Pure selection of one registered protocol for a parsed preference header.
//!
//! ## Weighting
//!
//! Each candidate's `major/minor` is weighted by the first rule that applies:
//!
//! 1. an exact `major/minor` entry
//! 2. the `major/*` weight, if non-zero
//! 3. the `*/*` weight, if non-zero
//! 4. otherwise the candidate does not match
//!
//! Ranking is purely numeric. `text/*;q=0.9` beats `application/yaml;q=0.6`;
//! specificity never overrides a weight.
//!
//! ## Ties
//!
//! When several candidates share the highest weight, the registry default
//! wins if it is among them; otherwise the earliest-registered one does.

use crate::accept::PreferenceSpec;
use crate::protocol::Protocol;
use std::sync::Arc;

/// A registered protocol together with its normalized major/minor types.
#[derive(Clone)]
pub struct Candidate {
    protocol: Arc<dyn Protocol>,
    major: String,
    minor: String,
}

impl Candidate {
    pub(crate) fn new(protocol: Arc<dyn Protocol>, major: String, minor: String) -> Self {
        Self {
            protocol,
            major,
            minor,
        }
    }

    /// The protocol itself.
    #[must_use]
    pub fn protocol(&self) -> &Arc<dyn Protocol> {
        &self.protocol
    }

    /// Normalized major type.
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Normalized minor type (empty for bare types).
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// Normalized `type/subtype`.
    #[must_use]
    pub fn essence(&self) -> String {
        if self.minor.is_empty() {
            self.major.clone()
        } else {
            format!("{}/{}", self.major, self.minor)
        }
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("content_type", &self.protocol.content_type())
            .field("major", &self.major)
            .field("minor", &self.minor)
            .finish()
    }
}

/// Weight the header assigns to `major/minor`, or `None` if it is not acceptable.
#[must_use]
pub fn weight(spec: &PreferenceSpec, major: &str, minor: &str) -> Option<f64> {
    let global = (spec.wildcard_q() > 0.0).then_some(spec.wildcard_q());
    let Some(group) = spec.group(major) else {
        return global;
    };
    if let Some(q) = group.minor_q(minor) {
        return Some(q);
    }
    if group.wildcard_q() > 0.0 {
        return Some(group.wildcard_q());
    }
    global
}

/// Pick the index of the winning candidate.
///
/// `default` is an index into `candidates`. Returns `None` when no candidate
/// is acceptable.
#[must_use]
pub fn select(
    spec: &PreferenceSpec,
    candidates: &[Candidate],
    default: Option<usize>,
) -> Option<usize> {
    let mut max_q = 0.0_f64;
    let mut best: Vec<usize> = Vec::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        let Some(q) = weight(spec, &candidate.major, &candidate.minor) else {
            continue;
        };
        if q > max_q {
            max_q = q;
            best.clear();
            best.push(idx);
        } else if q == max_q {
            best.push(idx);
        }
    }

    if let Some(default) = default {
        if best.contains(&default) {
            return Some(default);
        }
    }
    // candidates are in registration order, so the first tie is the earliest
    best.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accept::parse;
    use crate::protocol::CodecError;
    use serde_json::Value;
    use std::io::{Read, Write};

    struct Named(&'static str);

    impl Protocol for Named {
        fn content_type(&self) -> &str {
            self.0
        }
        fn decode(&self, _source: &mut dyn Read) -> Result<Value, CodecError> {
            Ok(Value::Null)
        }
        fn encode(&self, _value: &Value, _sink: &mut dyn Write) -> Result<(), CodecError> {
            Ok(())
        }
    }

    fn candidates(types: &[&'static str]) -> Vec<Candidate> {
        types
            .iter()
            .map(|&ct| {
                let (major, minor) = ct.split_once('/').unwrap_or((ct, ""));
                Candidate::new(Arc::new(Named(ct)), major.to_string(), minor.to_string())
            })
            .collect()
    }

    #[test]
    fn test_weight_rules() {
        let spec = parse("text/*;q=0.9, text/html;q=0.5, image/png;q=0.3, */*;q=0.1").unwrap();
        assert_eq!(weight(&spec, "text", "html"), Some(0.5));
        assert_eq!(weight(&spec, "text", "plain"), Some(0.9));
        // group present without a wildcard falls back to */*
        assert_eq!(weight(&spec, "image", "gif"), Some(0.1));
        // major absent entirely
        assert_eq!(weight(&spec, "application", "json"), Some(0.1));

        let spec = parse("image/png").unwrap();
        assert_eq!(weight(&spec, "image", "gif"), None);
        assert_eq!(weight(&spec, "application", "json"), None);
    }

    #[test]
    fn test_wildcard_outweighs_lower_exact() {
        let cands = candidates(&["application/yaml", "text/html"]);
        let spec = parse("text/*;q=0.9, application/yaml;q=0.6").unwrap();
        assert_eq!(select(&spec, &cands, None), Some(1));
    }

    #[test]
    fn test_tie_prefers_default_then_registration_order() {
        let cands = candidates(&["a/a", "b/b", "c/c"]);
        let spec = parse("*/*").unwrap();
        assert_eq!(select(&spec, &cands, None), Some(0));
        assert_eq!(select(&spec, &cands, Some(2)), Some(2));
    }

    #[test]
    fn test_default_outside_tie_is_ignored() {
        let cands = candidates(&["text/html", "application/msgpack", "application/json"]);
        let spec = parse("application/*,text/html;q=0.5").unwrap();
        assert_eq!(select(&spec, &cands, Some(0)), Some(1));
    }

    #[test]
    fn test_no_candidate_matches() {
        let cands = candidates(&["application/xml"]);
        let spec = parse("text/html").unwrap();
        assert_eq!(select(&spec, &cands, None), None);
        assert_eq!(select(&spec, &[], None), None);
    }
}
