// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenCodec;
use crate::config::Config;
use crate::store::InMemoryStore;

/// Shared application state, cloned into every handler.
///
/// The codec is read-only after startup; the store sits behind a lock because
/// it is the process-wide datastore stand-in. Nothing else is shared across
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub codec: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(InMemoryStore::new())),
            codec: Arc::new(TokenCodec::new(config)),
        }
    }
}
