// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Named catalog of in-memory graphs.
//!
//! The catalog owns every graph exclusively: a graph is dropped when its
//! entry is removed, and nothing outside the catalog may outlive it.
//! Algorithm runs pin an entry through [`Catalog::checkout`]; `remove`
//! rejects with `Busy` while any run is in flight rather than blocking.
//!
//! Locking: one `RwLock` guards the name map only. Entries are `Arc`s,
//! so once checked out, reads of different graphs (and of the same
//! graph) proceed without touching the map lock again.

use crate::graph::csr::{CsrGraph, CsrLayout, Orientation};
use crate::input::{self, GraphSource};
use parking_lot::RwLock;
use plexus_common::{PlexusError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Point-in-time description of one catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSummary {
    pub graph_name: String,
    pub vertex_count: u64,
    pub edge_count: u64,
    pub csr_layout: CsrLayout,
    pub orientation: Orientation,
    pub create_millis: u128,
}

#[derive(Debug)]
struct CatalogEntry {
    graph: Arc<CsrGraph>,
    summary: GraphSummary,
    /// Algorithm runs currently borrowing this graph. Incremented under
    /// the map read lock and checked under the map write lock, so
    /// `remove` can never miss a checkout in progress.
    in_flight: AtomicUsize,
}

#[derive(Default)]
pub struct Catalog {
    graphs: RwLock<HashMap<String, Arc<CatalogEntry>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the source, build a CSR graph and insert it atomically.
    ///
    /// The build runs outside the map lock; concurrent creates of
    /// *different* names never serialize on each other. A duplicate name
    /// fails up front and again at insert time (another create may have
    /// won the race during the build), leaving the prior graph untouched.
    pub fn create(&self, name: &str, source: &GraphSource) -> Result<GraphSummary> {
        if self.graphs.read().contains_key(name) {
            return Err(PlexusError::DuplicateGraph { name: name.into() });
        }

        let start = Instant::now();
        let edges = input::load(source.file_format, &source.path)?;
        let graph = CsrGraph::build(edges, source.csr_layout, source.orientation)?;

        let summary = GraphSummary {
            graph_name: name.to_string(),
            vertex_count: graph.vertex_count() as u64,
            edge_count: graph.edge_count() as u64,
            csr_layout: graph.layout(),
            orientation: graph.orientation(),
            create_millis: start.elapsed().as_millis(),
        };

        let mut map = self.graphs.write();
        match map.entry(name.to_string()) {
            Entry::Occupied(_) => Err(PlexusError::DuplicateGraph { name: name.into() }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(CatalogEntry {
                    graph: Arc::new(graph),
                    summary: summary.clone(),
                    in_flight: AtomicUsize::new(0),
                }));
                metrics::counter!("plexus_graphs_created_total").increment(1);
                info!(
                    graph = name,
                    vertices = summary.vertex_count,
                    edges = summary.edge_count,
                    millis = summary.create_millis as u64,
                    "graph created"
                );
                Ok(summary)
            }
        }
    }

    /// Snapshot of the current entries, in no particular order.
    pub fn list(&self) -> Vec<GraphSummary> {
        self.graphs
            .read()
            .values()
            .map(|entry| entry.summary.clone())
            .collect()
    }

    /// Drop a graph. Fails with `Busy` while algorithm runs hold it.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut map = self.graphs.write();
        let entry = map
            .get(name)
            .ok_or_else(|| PlexusError::GraphNotFound { name: name.into() })?;

        let in_flight = entry.in_flight.load(Ordering::Acquire);
        if in_flight > 0 {
            return Err(PlexusError::Busy {
                name: name.into(),
                in_flight,
            });
        }

        map.remove(name);
        metrics::counter!("plexus_graphs_removed_total").increment(1);
        info!(graph = name, "graph removed");
        Ok(())
    }

    /// Pin a graph for an algorithm run.
    ///
    /// The returned guard keeps the entry's in-flight counter raised
    /// until dropped; `remove` reports `Busy` for as long as any guard
    /// exists.
    pub fn checkout(&self, name: &str) -> Result<GraphRef> {
        let map = self.graphs.read();
        let entry = map
            .get(name)
            .cloned()
            .ok_or_else(|| PlexusError::GraphNotFound { name: name.into() })?;
        // Still under the read lock: a concurrent remove cannot observe
        // a zero counter after the lookup succeeded.
        entry.in_flight.fetch_add(1, Ordering::AcqRel);
        drop(map);

        Ok(GraphRef { entry })
    }

    pub fn len(&self) -> usize {
        self.graphs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.read().is_empty()
    }
}

/// Read guard over one catalog entry.
///
/// Holds the graph alive and marks the entry busy; never outlives the
/// run that checked it out.
#[derive(Debug)]
pub struct GraphRef {
    entry: Arc<CatalogEntry>,
}

impl GraphRef {
    pub fn graph(&self) -> &CsrGraph {
        &self.entry.graph
    }

    pub fn summary(&self) -> &GraphSummary {
        &self.entry.summary
    }
}

impl Deref for GraphRef {
    type Target = CsrGraph;

    fn deref(&self) -> &CsrGraph {
        &self.entry.graph
    }
}

impl Drop for GraphRef {
    fn drop(&mut self) {
        self.entry.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
