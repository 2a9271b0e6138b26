// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic contract for alternate app-icon switching.

use std::collections::BTreeSet;

use iconwerk_core::error::Result;

/// Completion callback for an icon switch.
///
/// The OS may deliver its completion on a different execution context than
/// the originating call; adapters invoke this from wherever the OS calls
/// back and the channel layer is responsible for hopping the response back
/// to the caller's context.
pub type SwitchCompletion = Box<dyn FnOnce(Result<()>) + Send + 'static>;

/// One platform's alternate-icon capability.
///
/// Every adapter must uphold two rules: operations on an unsupported
/// platform/version fail with `IconwerkError::Unavailable` (never a silent
/// `false`), and [`set_alternate_icon_name`](IconBridge::set_alternate_icon_name)
/// invokes its completion exactly once.
pub trait IconBridge: Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;

    /// Whether the running OS supports dynamic icon switching.
    ///
    /// `Ok(false)` means "capability present but reported off" — distinct
    /// from `Err(Unavailable)`, which means the capability does not exist
    /// on this platform/version at all.
    fn supports_alternate_icons(&self) -> Result<bool>;

    /// The currently active alternate icon identifier; `None` while the
    /// default icon is active.
    fn alternate_icon_name(&self) -> Result<Option<String>>;

    /// Request an icon switch. `icon_name = None` restores the default.
    ///
    /// With `show_alert` the documented OS transition is used, which may
    /// show a user-facing confirmation banner. Without it the adapter
    /// attempts a silent switch through an undocumented entry point —
    /// best-effort: absent or rejected entry points complete with
    /// `SetIconFailed`, never a hang and never silent success.
    fn set_alternate_icon_name(
        &self,
        icon_name: Option<&str>,
        show_alert: bool,
        done: SwitchCompletion,
    );

    /// Icon identifiers declared in the application's packaged manifest.
    /// Empty when no alternate icons are declared.
    fn available_icons(&self) -> Result<BTreeSet<String>>;
}
