// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Gatehouse Contributors

//! # Authentication & Authorization
//!
//! The request authentication pipeline:
//!
//! 1. Login mints [`Claims`] for the account and the [`TokenCodec`] signs
//!    them with the process-wide secret (HS256, pinned).
//! 2. Every inbound request passes through [`middleware::authenticate`],
//!    which verifies the bearer credential (or accepts its absence) and
//!    attaches an immutable [`AuthContext`] to the request.
//! 3. Handlers receive the context through the [`Ctx`] extractor and call
//!    [`gate::authorize`] against their route's minimum [`AuthLevel`] before
//!    touching business logic.
//!
//! Claims are reconstructed from the token on every request; nothing is
//! cached server-side between requests.

pub mod claims;
pub mod extractor;
pub mod gate;
pub mod level;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::{AuthContext, Claims};
pub use extractor::Ctx;
pub use gate::authorize;
pub use level::AuthLevel;
pub use token::{TokenCodec, TokenError};
