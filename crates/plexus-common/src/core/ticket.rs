// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! Opaque tickets correlating a compute call to its property dataset.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-minted identifier for one property dataset.
///
/// Tickets are random v4 UUIDs: collision-free for the lifetime of the
/// process without needing any cross-request coordination. They are not
/// a security boundary.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(uuid::Uuid);

impl Ticket {
    pub fn mint() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket({})", self.0)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = uuid::Uuid::parse_str(s).map_err(|e| anyhow!("Invalid ticket '{}': {}", s, e))?;
        Ok(Self(inner))
    }
}
