// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Service handle tying catalog, engine and property store together.

use anyhow::anyhow;
use plexus_algo::engine::{self, AlgorithmSpec, ComputeSummary};
use plexus_algo::properties::{Batches, PropertyDataset, PropertyStore};
use plexus_common::{PlexusError, Result, ServiceConfig, Ticket};
use plexus_graph::{Catalog, GraphSource, GraphSummary};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Handle to one Plexus service instance.
///
/// Cheap to clone; all clones share the same catalog, property store
/// and worker pool. Constructed once at service start and torn down at
/// service stop — there is no global singleton.
#[derive(Clone)]
pub struct Plexus {
    catalog: Arc<Catalog>,
    properties: Arc<PropertyStore>,
    /// Scoped rayon pool sized by `config.parallelism`; every algorithm
    /// run executes inside it rather than on the global pool.
    pool: Arc<rayon::ThreadPool>,
    config: Arc<ServiceConfig>,
}

impl Plexus {
    /// Fails only if the worker pool cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .thread_name(|i| format!("plexus-worker-{i}"))
            .build()
            .map_err(|e| PlexusError::Internal(anyhow!("worker pool build failed: {e}")))?;

        Ok(Self {
            catalog: Arc::new(Catalog::new()),
            properties: Arc::new(PropertyStore::new(config.property_store)),
            pool: Arc::new(pool),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Build a graph from a source file and insert it into the catalog.
    ///
    /// Parsing and CSR construction are CPU-bound, so they run on the
    /// blocking pool; concurrent creates of different graphs execute in
    /// parallel.
    pub async fn create_graph(&self, name: &str, source: GraphSource) -> Result<GraphSummary> {
        let catalog = Arc::clone(&self.catalog);
        let name = name.to_string();
        tokio::task::spawn_blocking(move || catalog.create(&name, &source))
            .await
            .map_err(|e| PlexusError::Internal(anyhow!("graph build task failed: {e}")))?
    }

    pub fn list_graphs(&self) -> Vec<GraphSummary> {
        self.catalog.list()
    }

    /// Remove a graph. Fails with `Busy` while algorithm runs hold it.
    pub fn remove_graph(&self, name: &str) -> Result<()> {
        self.catalog.remove(name)
    }

    /// Run an algorithm against a cataloged graph.
    ///
    /// The graph stays pinned (checkout guard) for exactly the duration
    /// of the run. Cancelling `cancel` aborts the iteration loop; a
    /// cancelled run publishes no dataset.
    pub async fn compute(
        &self,
        graph_name: &str,
        spec: AlgorithmSpec,
        property_key: &str,
        cancel: CancellationToken,
    ) -> Result<ComputeSummary> {
        let guard = self.catalog.checkout(graph_name)?;
        let store = Arc::clone(&self.properties);
        let pool = Arc::clone(&self.pool);
        let property_key = property_key.to_string();

        tokio::task::spawn_blocking(move || {
            let summary =
                pool.install(|| engine::execute(guard.graph(), spec, &property_key, &store, &cancel));
            drop(guard);
            summary
        })
        .await
        .map_err(|e| PlexusError::Internal(anyhow!("algorithm task failed: {e}")))?
    }

    /// Resolve a ticket to its dataset.
    pub fn resolve(&self, ticket: &Ticket) -> Result<Arc<PropertyDataset>> {
        self.properties.get(ticket)
    }

    /// Restartable record-batch sequence for streamed retrieval.
    pub fn retrieve(&self, ticket: &Ticket) -> Result<Batches> {
        Ok(self.resolve(ticket)?.batches(self.config.batch_size))
    }
}
