// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Property datasets and the ticket-keyed store.
//!
//! A dataset is the immutable output column of one algorithm run. Its
//! lifetime is independent of the graph that produced it: retrieval
//! stays valid after the graph is removed from the catalog, and datasets
//! only leave the store through the eviction policy (TTL plus a capacity
//! cap, oldest first).

use parking_lot::RwLock;
use plexus_common::{PlexusError, PropertyStoreConfig, Result, Ticket, VertexId};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Dense typed column, one value per vertex.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyValues {
    Double(Vec<f64>),
    Long(Vec<u64>),
}

impl PropertyValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Double(v) => v.len(),
            Self::Long(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn chunk(&self, start: usize, end: usize) -> PropertyValues {
        match self {
            Self::Double(v) => Self::Double(v[start..end].to_vec()),
            Self::Long(v) => Self::Long(v[start..end].to_vec()),
        }
    }
}

/// Immutable output of one algorithm run.
#[derive(Debug)]
pub struct PropertyDataset {
    pub property_key: String,
    pub values: PropertyValues,
    created_at: Instant,
}

impl PropertyDataset {
    pub fn new(property_key: impl Into<String>, values: PropertyValues) -> Self {
        Self {
            property_key: property_key.into(),
            values,
            created_at: Instant::now(),
        }
    }

    /// Row count; always equals the source graph's vertex count at
    /// compute time.
    pub fn vertex_count(&self) -> usize {
        self.values.len()
    }

    /// Finite, restartable sequence of record batches in vertex order.
    pub fn batches(self: &Arc<Self>, batch_size: usize) -> Batches {
        assert!(batch_size > 0, "batch_size must be positive");
        Batches {
            dataset: Arc::clone(self),
            batch_size,
            pos: 0,
        }
    }
}

/// One streamed chunk of `(vertex_id, value)` rows.
#[derive(Debug, Clone, Serialize)]
pub struct RecordBatch {
    pub vertex_ids: Vec<VertexId>,
    pub values: PropertyValues,
}

/// Iterator over a dataset's record batches. Owns an `Arc`, so streams
/// never borrow from the store.
#[derive(Debug)]
pub struct Batches {
    dataset: Arc<PropertyDataset>,
    batch_size: usize,
    pos: usize,
}

impl Iterator for Batches {
    type Item = RecordBatch;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.vertex_count();
        if self.pos >= total {
            return None;
        }
        let start = self.pos;
        let end = (start + self.batch_size).min(total);
        self.pos = end;

        Some(RecordBatch {
            vertex_ids: (start as VertexId..end as VertexId).collect(),
            values: self.dataset.values.chunk(start, end),
        })
    }
}

/// Ticket-keyed store of property datasets.
pub struct PropertyStore {
    config: PropertyStoreConfig,
    inner: RwLock<HashMap<Ticket, Arc<PropertyDataset>>>,
}

impl PropertyStore {
    pub fn new(config: PropertyStoreConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a dataset and mint its ticket.
    ///
    /// Eviction runs inside the same write section: expired datasets are
    /// dropped first, then oldest-first eviction enforces the capacity
    /// cap so the store never exceeds `max_datasets`.
    pub fn insert(&self, dataset: PropertyDataset) -> Ticket {
        let ticket = Ticket::mint();
        let mut map = self.inner.write();

        let before = map.len();
        map.retain(|_, ds| ds.created_at.elapsed() < self.config.ttl);

        while map.len() >= self.config.max_datasets {
            let oldest = map
                .iter()
                .min_by_key(|(_, ds)| ds.created_at)
                .map(|(t, _)| *t);
            match oldest {
                Some(t) => {
                    map.remove(&t);
                }
                None => break,
            }
        }

        let evicted = before.saturating_sub(map.len());
        if evicted > 0 {
            metrics::counter!("plexus_datasets_evicted_total").increment(evicted as u64);
            debug!(evicted, "property datasets evicted");
        }

        map.insert(ticket, Arc::new(dataset));
        ticket
    }

    pub fn get(&self, ticket: &Ticket) -> Result<Arc<PropertyDataset>> {
        self.inner
            .read()
            .get(ticket)
            .cloned()
            .ok_or_else(|| PlexusError::UnknownTicket {
                ticket: ticket.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scores(n: usize) -> PropertyDataset {
        PropertyDataset::new("rank", PropertyValues::Double(vec![0.5; n]))
    }

    fn store(max_datasets: usize, ttl: Duration) -> PropertyStore {
        PropertyStore::new(PropertyStoreConfig { max_datasets, ttl })
    }

    #[test]
    fn test_insert_and_get() {
        let store = store(4, Duration::from_secs(60));
        let ticket = store.insert(scores(10));

        let dataset = store.get(&ticket).unwrap();
        assert_eq!(dataset.vertex_count(), 10);
        assert_eq!(dataset.property_key, "rank");
    }

    #[test]
    fn test_unknown_ticket() {
        let store = store(4, Duration::from_secs(60));
        let err = store.get(&Ticket::mint()).unwrap_err();
        assert!(matches!(err, PlexusError::UnknownTicket { .. }));
    }

    #[test]
    fn test_capacity_eviction_is_oldest_first() {
        let store = store(2, Duration::from_secs(60));
        let first = store.insert(scores(1));
        let second = store.insert(scores(2));
        let third = store.insert(scores(3));

        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_err());
        assert!(store.get(&second).is_ok());
        assert!(store.get(&third).is_ok());
    }

    #[test]
    fn test_ttl_eviction() {
        let store = store(16, Duration::ZERO);
        let stale = store.insert(scores(1));
        // The zero TTL expires `stale` as soon as the next insert runs.
        let fresh = store.insert(scores(2));

        assert!(store.get(&stale).is_err());
        // `fresh` itself survives until another insert evicts it.
        assert!(store.get(&fresh).is_ok());
    }

    #[test]
    fn test_batches_cover_all_rows_in_order() {
        let dataset = Arc::new(PropertyDataset::new(
            "rank",
            PropertyValues::Double((0..10).map(|i| i as f64).collect()),
        ));

        let batches: Vec<_> = dataset.batches(4).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].vertex_ids, vec![0, 1, 2, 3]);
        assert_eq!(batches[2].vertex_ids, vec![8, 9]);

        let total: usize = batches.iter().map(|b| b.vertex_ids.len()).sum();
        assert_eq!(total, 10);

        // Restartable: a fresh iterator yields the same sequence.
        let again: Vec<_> = dataset.batches(4).collect();
        assert_eq!(again[0].vertex_ids, batches[0].vertex_ids);
    }

    #[test]
    fn test_empty_dataset_has_no_batches() {
        let dataset = Arc::new(PropertyDataset::new(
            "rank",
            PropertyValues::Double(Vec::new()),
        ));
        assert_eq!(dataset.batches(8).count(), 0);
    }

    #[test]
    fn test_long_column_batches() {
        let dataset = Arc::new(PropertyDataset::new(
            "component",
            PropertyValues::Long(vec![0, 0, 1]),
        ));
        let batches: Vec<_> = dataset.batches(2).collect();
        assert_eq!(batches.len(), 2);
        match &batches[1].values {
            PropertyValues::Long(v) => assert_eq!(v, &vec![1]),
            other => panic!("expected Long column, got {other:?}"),
        }
    }
}
