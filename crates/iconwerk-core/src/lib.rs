// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Iconwerk — Core types, errors and manifest parsing shared across all crates.

pub mod error;
pub mod manifest;
pub mod types;

pub use error::IconwerkError;
pub use manifest::IconManifest;
pub use types::*;
