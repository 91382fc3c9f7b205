//! # Registry Module
//!
//! The registry owns the registered [`Protocol`](crate::protocol::Protocol)s,
//! the configured default, and the Accept header [`SpecCache`](crate::cache::SpecCache).
//!
//! ## Overview
//!
//! ```text
//! match_header(raw) ──► SpecCache::get_or_parse(raw) ──► negotiate::select(spec, snapshot)
//!                          │ hit: cached spec               │
//!                          └ miss: accept::parse + store    └► Some(protocol) | None
//! ```
//!
//! ## Concurrency
//!
//! Registered state is an immutable snapshot behind an `ArcSwap`:
//!
//! - **Readers** (`match_header`, `match_content_type`) load the current
//!   snapshot without taking a lock and never block each other.
//! - **Writers** (`register`, `set_default`, `reset`) hold a writer mutex for
//!   the whole read-modify-publish sequence so concurrent registrations
//!   cannot lose updates, then publish with a single atomic store.
//!
//! The spec cache has its own short critical section and is never locked
//! while a header is being parsed.
//!
//! ## Process-wide Registry
//!
//! [`global()`] returns a lazily created registry configured from the
//! environment. Independent registries can be built with [`Registry::new`]
//! for tests or multi-tenant services.
//!
//! ## Duplicate Content Types
//!
//! Registering a second protocol for a `type/subtype` that is already
//! registered is rejected with
//! [`ConfigError::DuplicateContentType`](crate::error::ConfigError::DuplicateContentType).

mod core;

pub use self::core::Registry;

use once_cell::sync::Lazy;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::from_env);

/// The process-wide registry.
#[must_use]
pub fn global() -> &'static Registry {
    &GLOBAL
}
