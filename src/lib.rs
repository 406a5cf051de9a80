// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! Gatehouse - Account Management Service
//!
//! Bearer-token authenticated user account backend. Claims are minted at
//! login, signed with a process-wide secret, and re-verified on every
//! request; routes are gated by an ordered access tier.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `auth` - token codec, middleware, authorization gate
//! - `envelope` - uniform success/error response wrapper
//! - `store` - in-memory user repository (persistence collaborator stand-in)

pub mod api;
pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
