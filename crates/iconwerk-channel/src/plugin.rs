// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Channel lifecycle: a scoped handler registration.
//
// Mirrors the host SDK's attach/detach hooks — `attach` is the
// onAttachedToEngine moment, dropping the returned guard is
// onDetachedFromEngine. The channel holds no state of its own beyond the
// registration.

use std::sync::Arc;

use iconwerk_bridge::capability;
use iconwerk_bridge::traits::IconBridge;

use crate::dispatch::IconCallHandler;
use crate::host::MethodChannelHost;

/// Name of the icon method channel.
pub const CHANNEL_NAME: &str = "flutter_dynamic_icon";

/// A live handler registration. Dropping it unregisters the handler.
pub struct IconChannel {
    host: Arc<dyn MethodChannelHost>,
}

impl IconChannel {
    /// Register the icon-call handler on `host` and return the guard.
    ///
    /// Called on the main context by convention; this is also the moment
    /// the process-wide capability flag gets resolved.
    pub fn attach(host: Arc<dyn MethodChannelHost>, bridge: Arc<dyn IconBridge>) -> Self {
        tracing::info!(
            channel = CHANNEL_NAME,
            platform = bridge.platform_name(),
            supported = capability::alternate_icons_supported(),
            "attaching icon method channel"
        );
        host.register_handler(CHANNEL_NAME, Arc::new(IconCallHandler::new(bridge)));
        Self { host }
    }
}

impl Drop for IconChannel {
    fn drop(&mut self) {
        tracing::info!(channel = CHANNEL_NAME, "detaching icon method channel");
        self.host.unregister_handler(CHANNEL_NAME);
    }
}
