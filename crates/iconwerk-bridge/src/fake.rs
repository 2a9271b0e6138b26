// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory bridge for host-side development and tests.
//
// Mirrors real OS behavior closely enough to exercise the channel layer:
// switches to undeclared icons are rejected with the declared set listed in
// the message, the silent-switch path can be configured absent, and
// switching to the already-active icon reports success (the OS reports no
// error in that case, so neither do we).

use std::collections::BTreeSet;
use std::sync::Mutex;

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::manifest::IconManifest;

use crate::traits::{IconBridge, SwitchCompletion};

/// Configurable in-memory icon bridge.
pub struct FakeBridge {
    supported: bool,
    quiet_switch_available: bool,
    manifest: IconManifest,
    current: Mutex<Option<String>>,
}

impl FakeBridge {
    /// A supported platform with the given declared icons and a working
    /// silent-switch entry point.
    pub fn supported(manifest: IconManifest) -> Self {
        Self {
            supported: true,
            quiet_switch_available: true,
            manifest,
            current: Mutex::new(None),
        }
    }

    /// A supported platform whose OS build lacks the private silent-switch
    /// entry point.
    pub fn without_quiet_switch(manifest: IconManifest) -> Self {
        Self {
            quiet_switch_available: false,
            ..Self::supported(manifest)
        }
    }

    /// A platform/version without the capability at all.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            quiet_switch_available: false,
            manifest: IconManifest::default(),
            current: Mutex::new(None),
        }
    }

    fn gate(&self) -> Result<()> {
        if self.supported {
            Ok(())
        } else {
            Err(IconwerkError::Unavailable)
        }
    }

    fn switch_outcome(&self, icon_name: Option<&str>, show_alert: bool) -> Result<()> {
        self.gate()?;
        if !show_alert && !self.quiet_switch_available {
            return Err(IconwerkError::SetIconFailed(
                "private set entry point is absent on this OS build".into(),
            ));
        }
        if let Some(name) = icon_name {
            if !self.manifest.contains(name) {
                let declared: Vec<&str> = self.manifest.names().collect();
                return Err(IconwerkError::SetIconFailed(format!(
                    "icon '{name}' not found, declared icons: {declared:?}"
                )));
            }
        }
        *self.current.lock().unwrap() = icon_name.map(str::to_owned);
        Ok(())
    }
}

impl IconBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake"
    }

    fn supports_alternate_icons(&self) -> Result<bool> {
        self.gate()?;
        Ok(true)
    }

    fn alternate_icon_name(&self) -> Result<Option<String>> {
        self.gate()?;
        Ok(self.current.lock().unwrap().clone())
    }

    fn set_alternate_icon_name(
        &self,
        icon_name: Option<&str>,
        show_alert: bool,
        done: SwitchCompletion,
    ) {
        done(self.switch_outcome(icon_name, show_alert));
    }

    fn available_icons(&self) -> Result<BTreeSet<String>> {
        self.gate()?;
        Ok(self.manifest.to_set())
    }
}
