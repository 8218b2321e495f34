// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

//! HTTP front end for the Plexus service.

pub mod actions;
pub mod server;

pub use server::start_server;
