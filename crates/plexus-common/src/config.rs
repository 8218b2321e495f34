// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use std::thread;
use std::time::Duration;

/// Eviction policy for the property store.
///
/// Property datasets are immutable and live independently of the graph
/// that produced them, so without eviction the store grows without
/// bound. Expired datasets are dropped on every insert; if the store is
/// still over capacity the oldest datasets go first.
#[derive(Clone, Copy, Debug)]
pub struct PropertyStoreConfig {
    /// Maximum number of retained datasets (default: 64)
    pub max_datasets: usize,

    /// Maximum dataset age before it becomes evictable (default: 1 hour)
    pub ttl: Duration,
}

impl Default for PropertyStoreConfig {
    fn default() -> Self {
        Self {
            max_datasets: 64,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// HTTP server configuration.
///
/// Authentication is deliberately out of scope for Plexus; deployments
/// are expected to sit behind a trusted gateway. CORS stays configurable
/// so browser-based tooling can be scoped to known origins.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Allowed CORS origins.
    ///
    /// - Empty vector: no CORS headers (most restrictive)
    /// - `["*"]`: allow all origins (development only)
    /// - Explicit list: only allow the listed origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Permissive config for local development only.
    #[must_use]
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }

    /// Returns a warning if the config is too permissive for production.
    pub fn security_warning(&self) -> Option<&'static str> {
        if self.allowed_origins.contains(&"*".to_string()) {
            Some(
                "Server config has permissive CORS (allow all origins). \
                 Restrict to specific origins for production deployments.",
            )
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Number of worker threads for parallel algorithm execution
    pub parallelism: usize,

    /// Rows per record batch in streamed property retrieval (default: 1024)
    pub batch_size: usize,

    /// Property store eviction policy
    pub property_store: PropertyStoreConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let parallelism = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            parallelism,
            batch_size: 1024,
            property_store: PropertyStoreConfig::default(),
        }
    }
}
