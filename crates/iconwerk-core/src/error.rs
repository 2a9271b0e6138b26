// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Iconwerk.

use thiserror::Error;

/// Top-level error type for all Iconwerk operations.
///
/// The first three variants form the channel's error taxonomy; the rest
/// cover native plumbing and manifest loading and are not part of the
/// caller-facing contract.
#[derive(Debug, Error)]
pub enum IconwerkError {
    /// The platform or OS version lacks the alternate-icon capability.
    /// Permanent for the lifetime of the process.
    #[error("alternate icons are not supported on this platform or OS version")]
    Unavailable,

    /// The OS rejected or could not complete an icon switch. Transient —
    /// a retry may succeed. Carries the underlying OS error text.
    #[error("failed to set icon: {0}")]
    SetIconFailed(String),

    /// The caller used a method name outside the channel contract.
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    /// Native plumbing fault outside the contract taxonomy (JNI attach
    /// failure, off-main UIKit call, null context).
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IconwerkError {
    /// Stable code string carried in the wire envelope.
    pub fn code(&self) -> &'static str {
        match self {
            IconwerkError::Unavailable => "Unavailable",
            IconwerkError::SetIconFailed(_) => "SetIconFailed",
            IconwerkError::NotImplemented(_) => "NotImplemented",
            IconwerkError::Bridge(_) => "Bridge",
            IconwerkError::Io(_) => "Io",
            IconwerkError::Serialization(_) => "Serialization",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IconwerkError>;
