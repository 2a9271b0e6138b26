// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Silent icon switch through the private UIKit entry point.
//
// `-[UIApplication _setAlternateIconName:completionHandler:]` changes the
// icon without the user-facing confirmation banner. It is undocumented and
// carries no vendor stability guarantee: it has the same shape as the
// public API today, and any future OS release may remove or reshape it.
// Everything here is best-effort — a missing or rejecting entry point
// completes with `SetIconFailed`, and nothing in this module is reachable
// from the documented path.

use objc2::{msg_send, sel};
use objc2_foundation::NSString;
use objc2_ui_kit::UIApplication;

use iconwerk_core::error::IconwerkError;

use crate::traits::SwitchCompletion;

use super::completion_block;

/// Attempt a banner-free icon switch. Invokes `done` exactly once.
pub(super) fn set_without_alert(
    app: &UIApplication,
    icon_name: Option<&NSString>,
    done: SwitchCompletion,
) {
    let quiet = sel!(_setAlternateIconName:completionHandler:);

    // Probe before sending: an unrecognized selector would raise, not error.
    // SAFETY: respondsToSelector: on a live UIApplication instance.
    let responds: bool = unsafe { msg_send![app, respondsToSelector: quiet] };
    if !responds {
        tracing::warn!("private icon-switch selector absent on this OS build");
        done(Err(IconwerkError::SetIconFailed(
            "private set entry point is absent on this OS build".into(),
        )));
        return;
    }

    let block = completion_block(done);
    // SAFETY: the probe above confirmed the selector exists; its observed
    // signature matches the public setAlternateIconName:completionHandler:
    // (nullable NSString, ^(NSError * _Nullable)). UIKit copies the block.
    unsafe {
        let _: () = msg_send![
            app,
            _setAlternateIconName: icon_name,
            completionHandler: &*block,
        ];
    }
}
