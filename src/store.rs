// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! In-memory user repository.
//!
//! Stand-in for the external persistence collaborator. Handlers reach it
//! through `Arc<RwLock<InMemoryStore>>` on [`crate::state::AppState`]; the
//! auth pipeline itself never touches it.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{RegisterRequest, User};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<Uuid, User>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Uuid) -> Result<&User, ApiError> {
        self.users
            .get(id)
            .ok_or_else(|| ApiError::not_found("User Not Found"))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|u| u.name == name)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    /// Page through users ordered by creation time.
    pub fn list(&self, start: usize, count: usize) -> Vec<User> {
        let mut users: Vec<&User> = self.users.values().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        users
            .into_iter()
            .skip(start)
            .take(count)
            .cloned()
            .collect()
    }

    /// Insert a new user. `password` must already be hashed.
    pub fn create(&mut self, request: RegisterRequest, password_hash: String) -> Result<User, ApiError> {
        if self.find_by_name(&request.name).is_some() {
            return Err(ApiError::conflict("Username Already Exists"));
        }
        if self.find_by_email(&request.email).is_some() {
            return Err(ApiError::conflict("Email Already In Use"));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            password: password_hash,
            country: request.country,
            locale: request.locale,
            groups: Vec::new(),
            created_at: Utc::now(),
            last_login: None,
            last_token: None,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Apply an in-place edit to an existing user.
    pub fn update<F>(&mut self, id: &Uuid, edit: F) -> Result<User, ApiError>
    where
        F: FnOnce(&mut User),
    {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("User Not Found"))?;
        edit(user);
        Ok(user.clone())
    }

    /// Login bookkeeping: stamp last login time and remember the issued token.
    pub fn record_login(&mut self, id: &Uuid, token: &str) -> Result<(), ApiError> {
        let user = self
            .users
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("User Not Found"))?;
        user.last_login = Some(Utc::now());
        user.last_token = Some(token.to_string());
        Ok(())
    }

    pub fn delete(&mut self, id: &Uuid) -> Result<(), ApiError> {
        if self.users.remove(id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("User Not Found"))
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
