//! Shared-instance registry.
//!
//! The host application builds one [`CookieManager`] and registers it; the
//! components that need cookies look it up by name instead of building
//! their own, so every component sees the same policy and the same store.

use crate::cookies::document::{CookieStore, DocumentCookieStore};
use crate::cookies::manager::CookieManager;
use dashmap::DashMap;
use std::sync::Arc;

/// Key the default manager is registered under.
pub const COOKIE_KEY: &str = "cookie";

pub struct CookieRegistry<S: CookieStore = DocumentCookieStore> {
    managers: DashMap<String, Arc<CookieManager<S>>>,
}

impl<S: CookieStore> Default for CookieRegistry<S> {
    fn default() -> Self {
        Self {
            managers: DashMap::new(),
        }
    }
}

impl<S: CookieStore> CookieRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `manager` under [`COOKIE_KEY`] and return the shared handle.
    pub fn provide(&self, manager: CookieManager<S>) -> Arc<CookieManager<S>> {
        self.provide_as(COOKIE_KEY, Arc::new(manager))
    }

    /// Register an already shared manager under `key`, replacing any
    /// previous registration.
    pub fn provide_as(
        &self,
        key: impl Into<String>,
        manager: Arc<CookieManager<S>>,
    ) -> Arc<CookieManager<S>> {
        let key = key.into();
        if self
            .managers
            .insert(key.clone(), Arc::clone(&manager))
            .is_some()
        {
            tracing::debug!(key = %key, "replaced registered cookie manager");
        }
        manager
    }

    pub fn inject(&self, key: &str) -> Option<Arc<CookieManager<S>>> {
        self.managers.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// The manager registered under [`COOKIE_KEY`].
    pub fn cookie(&self) -> Option<Arc<CookieManager<S>>> {
        self.inject(COOKIE_KEY)
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
