// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Every operation fails with `Unavailable` — real implementations live in
// the `ios` and `android` modules. For a desktop bridge with working
// in-memory behavior, see `fake::FakeBridge`.

use std::collections::BTreeSet;

use iconwerk_core::error::{IconwerkError, Result};

use crate::traits::{IconBridge, SwitchCompletion};

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl IconBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn supports_alternate_icons(&self) -> Result<bool> {
        tracing::warn!("supports_alternate_icons called on stub bridge");
        Err(IconwerkError::Unavailable)
    }

    fn alternate_icon_name(&self) -> Result<Option<String>> {
        tracing::warn!("alternate_icon_name called on stub bridge");
        Err(IconwerkError::Unavailable)
    }

    fn set_alternate_icon_name(
        &self,
        _icon_name: Option<&str>,
        _show_alert: bool,
        done: SwitchCompletion,
    ) {
        tracing::warn!("set_alternate_icon_name called on stub bridge");
        done(Err(IconwerkError::Unavailable));
    }

    fn available_icons(&self) -> Result<BTreeSet<String>> {
        tracing::warn!("available_icons called on stub bridge");
        Err(IconwerkError::Unavailable)
    }
}
