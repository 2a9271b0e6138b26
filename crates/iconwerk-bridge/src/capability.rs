// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide capability flag.
//
// OS-version gating lives here instead of being scattered through every
// operation: the flag is resolved once on first consultation and is
// permanent for the process lifetime. The channel forces resolution while
// attaching on the main context, so adapters may consult it freely
// afterwards from any thread.

use std::sync::OnceLock;

static SUPPORTED: OnceLock<bool> = OnceLock::new();

/// Whether the running platform/version can switch alternate icons.
pub fn alternate_icons_supported() -> bool {
    *SUPPORTED.get_or_init(probe)
}

#[cfg(target_os = "ios")]
fn probe() -> bool {
    crate::ios::probe_support()
}

#[cfg(target_os = "android")]
fn probe() -> bool {
    // The activity-alias emulation needs nothing version-specific.
    true
}

#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn probe() -> bool {
    false
}
