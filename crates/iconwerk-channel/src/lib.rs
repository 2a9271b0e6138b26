// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! The `flutter_dynamic_icon` method channel.
//!
//! One named bidirectional channel carries method-call/response pairs
//! between a host runtime and the platform icon bridge. The host runtime
//! itself stays out of scope — it appears only as the
//! [`host::MethodChannelHost`] collaborator that owns handler registration
//! and main-context dispatch.

pub mod dispatch;
pub mod host;
pub mod plugin;

pub use host::{MethodCallHandler, MethodChannelHost, Reply};
pub use plugin::{CHANNEL_NAME, IconChannel};
