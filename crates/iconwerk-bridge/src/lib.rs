// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Native platform bridges for alternate app icons.
//!
//! This crate defines the [`traits::IconBridge`] contract and its platform
//! adapters: iOS (UIKit via `objc2`), Android (PackageManager activity
//! aliases via JNI), a stub for every other target, and an in-memory fake
//! for host-side development and tests.

pub mod capability;
pub mod fake;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::IconBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: type-safe message passing to UIKit through objc2.
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: JNI calls into PackageManager on the ART runtime.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // DESKTOP/CI: every operation reports Unavailable.
        Box::new(stub::StubBridge)
    }
}
