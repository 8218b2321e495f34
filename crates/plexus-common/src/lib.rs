// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

pub mod api {
    pub mod error;
}

pub mod config;

pub mod core {
    pub mod ticket;
}

// Re-exports for convenience
pub use api::error::{PlexusError, Result};
pub use config::{PropertyStoreConfig, ServerConfig, ServiceConfig};
pub use core::ticket::Ticket;

/// Dense vertex identifier inside a single graph (`0..vertex_count`).
pub type VertexId = u32;
