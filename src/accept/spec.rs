use super::media_type::MediaType;
use crate::error::ParseError;
use std::collections::HashMap;

/// Weights for one major type, e.g. everything under `text/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MajorGroup {
    wildcard_q: f64,
    minor_q: HashMap<String, f64>,
}

impl MajorGroup {
    /// Weight of `major/*`, or 0 when the header has no such range.
    #[must_use]
    pub fn wildcard_q(&self) -> f64 {
        self.wildcard_q
    }

    /// Weight of an exact `major/minor` entry.
    #[must_use]
    pub fn minor_q(&self, minor: &str) -> Option<f64> {
        self.minor_q.get(minor).copied()
    }
}

/// Parsed form of one Accept-style header.
///
/// Every stored weight is in `(0, 1]`. A range with `q=0` clears whatever an
/// earlier token set for it, so `*/*;q=0` is the same as having no `*/*` at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceSpec {
    wildcard_q: f64,
    major_groups: HashMap<String, MajorGroup>,
}

impl PreferenceSpec {
    /// Weight of `*/*`, or 0 when absent.
    #[must_use]
    pub fn wildcard_q(&self) -> f64 {
        self.wildcard_q
    }

    /// Weights recorded for a major type, if the header mentions it.
    #[must_use]
    pub fn group(&self, major: &str) -> Option<&MajorGroup> {
        self.major_groups.get(major)
    }

    /// A spec holding exactly one media range at weight 1.
    ///
    /// Used for request bodies, where `Content-Type` names a single type and
    /// any `q` parameter is meaningless.
    #[must_use]
    pub fn single(media_type: &MediaType) -> Self {
        let mut spec = Self::default();
        spec.insert(media_type.major(), media_type.minor(), 1.0);
        spec
    }

    /// Record `q` for one slot; a later token for the same slot replaces
    /// the earlier one, and `q=0` clears it.
    fn insert(&mut self, major: &str, minor: &str, q: f64) {
        if major == "*" && minor == "*" {
            self.wildcard_q = q;
            return;
        }
        if q <= 0.0 {
            if let Some(group) = self.major_groups.get_mut(major) {
                if minor == "*" {
                    group.wildcard_q = 0.0;
                } else {
                    group.minor_q.remove(minor);
                }
                if group.wildcard_q <= 0.0 && group.minor_q.is_empty() {
                    self.major_groups.remove(major);
                }
            }
            return;
        }
        let group = self.major_groups.entry(major.to_string()).or_default();
        if minor == "*" {
            group.wildcard_q = q;
        } else {
            group.minor_q.insert(minor.to_string(), q);
        }
    }
}

/// Parse a raw Accept-style header.
///
/// An empty header means `*/*`. Any malformed token or weight fails the
/// whole header; partial results are never returned.
///
/// # Example
///
/// ```rust
/// use represent::accept::parse;
///
/// let spec = parse("text/*;q=0.9, application/json").unwrap();
/// assert_eq!(spec.group("text").unwrap().wildcard_q(), 0.9);
/// assert_eq!(spec.group("application").unwrap().minor_q("json"), Some(1.0));
/// assert_eq!(spec.wildcard_q(), 0.0);
/// ```
pub fn parse(raw: &str) -> Result<PreferenceSpec, ParseError> {
    let raw = if raw.trim().is_empty() { "*/*" } else { raw };

    let mut spec = PreferenceSpec::default();
    for token in raw.split(',') {
        let media_type = MediaType::parse(token)?;
        let q = weight(token, &media_type)?;
        spec.insert(media_type.major(), media_type.minor(), q);
    }
    Ok(spec)
}

fn weight(token: &str, media_type: &MediaType) -> Result<f64, ParseError> {
    let Some(raw_q) = media_type.param("q") else {
        return Ok(1.0);
    };
    let invalid = || ParseError::InvalidWeight {
        token: token.trim().to_string(),
        value: raw_q.to_string(),
    };
    let q: f64 = raw_q.parse().map_err(|_| invalid())?;
    if !q.is_finite() || !(0.0..=1.0).contains(&q) {
        return Err(invalid());
    }
    Ok(q)
}
