use crate::accept::{MediaType, PreferenceSpec};
use crate::cache::{CacheStats, SpecCache};
use crate::error::{ConfigError, ParseError};
use crate::negotiate::{self, Candidate};
use crate::protocol::Protocol;
use crate::runtime_config::RegistryConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Immutable snapshot of what is registered.
///
/// Published whole through [`ArcSwap`]; never mutated after publication.
#[derive(Clone, Default)]
struct RegistryState {
    /// In registration order, which is also the tie-break order
    candidates: Vec<Candidate>,
    /// Index into `candidates`
    default: Option<usize>,
}

/// A set of registered protocols plus the machinery to choose between them.
///
/// Reads (`match_*`) are lock-free snapshot loads. Writes (`register`,
/// `set_default`, `reset`) are serialized by a writer lock, build a complete
/// new snapshot, and publish it with one atomic store, so a concurrent match
/// sees either the old state or the new one.
///
/// # Example
///
/// ```rust
/// use represent::protocol::{JsonProtocol, YamlProtocol};
/// use represent::registry::Registry;
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// registry.register(Arc::new(JsonProtocol));
/// registry.register(Arc::new(YamlProtocol));
///
/// let chosen = registry
///     .match_header("application/yaml, application/json;q=0.5")
///     .expect("valid header")
///     .expect("acceptable protocol");
/// assert_eq!(chosen.content_type(), "application/yaml");
/// ```
pub struct Registry {
    state: ArcSwap<RegistryState>,
    write_lock: Mutex<()>,
    cache: SpecCache,
}

impl Registry {
    /// Create an empty registry with the default spec cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry configured from `REPRESENT_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(RegistryConfig::from_env())
    }

    /// Create an empty registry with explicit configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            state: ArcSwap::from_pointee(RegistryState::default()),
            write_lock: Mutex::new(()),
            cache: SpecCache::new(config.effective_cache_capacity()),
        }
    }

    /// Register a protocol, panicking on an invalid content type.
    ///
    /// Registration is startup wiring; a bad content type is a programming
    /// error. Use [`Registry::try_register`] to handle it instead.
    ///
    /// # Panics
    ///
    /// Panics with the [`ConfigError`] message when registration fails.
    #[allow(clippy::panic)]
    pub fn register(&self, protocol: Arc<dyn Protocol>) {
        if let Err(err) = self.try_register(protocol) {
            panic!("{err}");
        }
    }

    /// Register a protocol after the ones already registered.
    ///
    /// The content type must be a concrete, well-formed media type not
    /// already handled by another protocol. The current default is kept.
    pub fn try_register(&self, protocol: Arc<dyn Protocol>) -> Result<(), ConfigError> {
        let candidate = candidate_for(protocol)?;
        let essence = candidate.essence();

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.state.load_full();
        if current.candidates.iter().any(|c| c.essence() == essence) {
            return Err(ConfigError::DuplicateContentType {
                content_type: essence,
            });
        }

        let mut next = RegistryState::clone(&current);
        next.candidates.push(candidate);
        let position = next.candidates.len() - 1;
        self.state.store(Arc::new(next));

        info!(
            content_type = %essence,
            position = position,
            "protocol registered"
        );
        Ok(())
    }

    /// Make the protocol for `content_type` the tie-break winner, panicking if
    /// none is registered.
    ///
    /// # Panics
    ///
    /// Panics with the [`ConfigError`] message when no registered protocol
    /// handles `content_type`.
    #[allow(clippy::panic)]
    pub fn set_default(&self, content_type: &str) {
        if let Err(err) = self.try_set_default(content_type) {
            panic!("{err}");
        }
    }

    /// Make the protocol for `content_type` the tie-break winner.
    ///
    /// Content types are compared on their normalized `type/subtype`, so
    /// `Application/JSON` selects the `application/json` protocol.
    pub fn try_set_default(&self, content_type: &str) -> Result<(), ConfigError> {
        let wanted = MediaType::parse(content_type)
            .map_err(|source| ConfigError::InvalidContentType {
                content_type: content_type.to_string(),
                source,
            })?
            .essence();

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.state.load_full();
        let Some(idx) = current.candidates.iter().position(|c| c.essence() == wanted) else {
            return Err(ConfigError::UnregisteredDefault {
                content_type: content_type.to_string(),
            });
        };

        let mut next = RegistryState::clone(&current);
        next.default = Some(idx);
        self.state.store(Arc::new(next));

        info!(content_type = %wanted, "default protocol set");
        Ok(())
    }

    /// Choose a protocol for an Accept-style header.
    ///
    /// Returns `Ok(None)` when nothing registered is acceptable (HTTP `406`),
    /// and `Err` when the header is malformed (HTTP `400`). An empty header
    /// accepts anything.
    pub fn match_header(&self, raw: &str) -> Result<Option<Arc<dyn Protocol>>, ParseError> {
        let spec = self.cache.get_or_parse(raw)?;
        Ok(self.select(&spec, raw))
    }

    /// Choose a protocol able to decode a body of the given `Content-Type`.
    ///
    /// The content type is a single media type at weight 1; parameters such
    /// as `charset` are ignored. An empty content type accepts anything.
    /// Returns `Ok(None)` when nothing registered handles it (HTTP `415`).
    pub fn match_content_type(
        &self,
        content_type: &str,
    ) -> Result<Option<Arc<dyn Protocol>>, ParseError> {
        if content_type.trim().is_empty() {
            return self.match_header("");
        }
        let media_type = MediaType::parse(content_type)?;
        Ok(self.select(&PreferenceSpec::single(&media_type), content_type))
    }

    fn select(&self, spec: &PreferenceSpec, header: &str) -> Option<Arc<dyn Protocol>> {
        let state = self.state.load();
        let winner = negotiate::select(spec, &state.candidates, state.default)
            .and_then(|idx| state.candidates.get(idx))
            .map(|candidate| Arc::clone(candidate.protocol()));
        debug!(
            header = header,
            registered = state.candidates.len(),
            selected = winner.as_ref().map(|p| p.content_type()),
            "negotiated protocol"
        );
        winner
    }

    /// Registered protocols in registration order.
    #[must_use]
    pub fn protocols(&self) -> Vec<Arc<dyn Protocol>> {
        self.state
            .load()
            .candidates
            .iter()
            .map(|c| Arc::clone(c.protocol()))
            .collect()
    }

    /// Normalized content types in registration order.
    #[must_use]
    pub fn content_types(&self) -> Vec<String> {
        self.state
            .load()
            .candidates
            .iter()
            .map(Candidate::essence)
            .collect()
    }

    /// The configured default, if any.
    #[must_use]
    pub fn default_protocol(&self) -> Option<Arc<dyn Protocol>> {
        let state = self.state.load();
        state
            .default
            .and_then(|idx| state.candidates.get(idx))
            .map(|c| Arc::clone(c.protocol()))
    }

    /// Hit/miss counters for the Accept header cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every protocol, the default, and all cached headers.
    ///
    /// Meant for tests and teardown; a live service only ever appends.
    pub fn reset(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.state.store(Arc::new(RegistryState::default()));
        self.cache.clear();
        info!("protocol registry reset");
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.load();
        f.debug_struct("Registry")
            .field("candidates", &state.candidates)
            .field("default", &state.default)
            .field("cache", &self.cache.stats())
            .finish()
    }
}

fn candidate_for(protocol: Arc<dyn Protocol>) -> Result<Candidate, ConfigError> {
    let content_type = protocol.content_type();
    let media_type =
        MediaType::parse(content_type).map_err(|source| ConfigError::InvalidContentType {
            content_type: content_type.to_string(),
            source,
        })?;
    if media_type.is_wildcard() {
        return Err(ConfigError::WildcardContentType {
            content_type: content_type.to_string(),
        });
    }
    let major = media_type.major().to_string();
    let minor = media_type.minor().to_string();
    Ok(Candidate::new(protocol, major, minor))
}
