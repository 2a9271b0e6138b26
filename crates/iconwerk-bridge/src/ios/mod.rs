// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Each method wraps the
// corresponding `UIApplication` alternate-icon API through Objective-C
// message sends; the icon declarations are read from the main bundle's
// `CFBundleIcons` dictionary.
//
// This module is cfg-gated to `target_os = "ios"` and will not compile on
// other platforms. UIApplication access requires the main thread; methods
// called off-main return `IconwerkError::Bridge`. Switch completions are
// delivered on whatever queue UIKit chooses — the channel layer hops the
// response back to the caller's context.

#![cfg(target_os = "ios")]

use std::collections::BTreeSet;
use std::sync::Mutex;

use block2::RcBlock;
use objc2::runtime::AnyObject;
use objc2::{MainThreadMarker, msg_send, sel};
use objc2_foundation::{NSBundle, NSDictionary, NSError, NSString};
use objc2_ui_kit::UIApplication;

use iconwerk_core::error::{IconwerkError, Result};
use iconwerk_core::manifest::{ALTERNATE_ICONS_KEY, BUNDLE_ICONS_KEY};

use crate::capability;
use crate::traits::{IconBridge, SwitchCompletion};

mod quiet;

/// Probe used by the process-wide capability flag: does this UIKit build
/// carry the documented alternate-icon entry point at all?
///
/// Returns false off-main rather than touching `UIApplication` — the
/// channel resolves the flag on the main context during attach.
pub(crate) fn probe_support() -> bool {
    let Some(mtm) = MainThreadMarker::new() else {
        return false;
    };
    let app = UIApplication::sharedApplication(mtm);
    // SAFETY: respondsToSelector: on a live UIApplication instance.
    unsafe { msg_send![&app, respondsToSelector: sel!(setAlternateIconName:completionHandler:)] }
}

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| IconwerkError::Bridge("must be called from the main thread".into()))
}

fn require_support() -> Result<()> {
    if capability::alternate_icons_supported() {
        Ok(())
    } else {
        Err(IconwerkError::Unavailable)
    }
}

/// Wrap a [`SwitchCompletion`] into the `^(NSError * _Nullable)` completion
/// block shape UIKit expects. UIKit copies the block, so the `RcBlock` can
/// be dropped once the message send returns.
///
/// The block is `Fn` but the completion is `FnOnce`; the `Mutex<Option<..>>`
/// take() guards against a hypothetical double callback.
fn completion_block(done: SwitchCompletion) -> RcBlock<dyn Fn(*mut NSError)> {
    let done = Mutex::new(Some(done));
    RcBlock::new(move |error: *mut NSError| {
        let Some(done) = done.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if error.is_null() {
            done(Ok(()));
        } else {
            // SAFETY: non-null NSError* passed by UIKit, valid for the
            // duration of the block invocation.
            let message = unsafe { (*error).localizedDescription() }.to_string();
            done(Err(IconwerkError::SetIconFailed(message)));
        }
    })
}

/// Read the alternate icon identifiers declared under
/// `CFBundleIcons` / `CFBundleAlternateIcons` in the main bundle.
fn declared_icons() -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    let bundle = NSBundle::mainBundle();
    // SAFETY: infoDictionary returns the bundle's immutable Info.plist
    // dictionary; None when the bundle has no Info.plist.
    let Some(info) = (unsafe { bundle.infoDictionary() }) else {
        return names;
    };

    let Some(icons) = info.objectForKey(&*NSString::from_str(BUNDLE_ICONS_KEY)) else {
        return names;
    };
    let Some(icons) = icons.downcast_ref::<NSDictionary>() else {
        return names;
    };

    // Past the typed infoDictionary the values are plain AnyObject, so the
    // nested lookup keys go in as AnyObject too.
    let alternates_key = NSString::from_str(ALTERNATE_ICONS_KEY);
    let alternates_key: &AnyObject = alternates_key.as_ref();
    let Some(alternates) = icons.objectForKey(alternates_key) else {
        return names;
    };
    let Some(alternates) = alternates.downcast_ref::<NSDictionary>() else {
        return names;
    };

    for key in alternates.allKeys().iter() {
        if let Some(name) = key.downcast_ref::<NSString>() {
            names.insert(name.to_string());
        }
    }
    names
}

/// iOS implementation of the icon bridge.
///
/// Zero-sized — all state lives in UIKit.
pub struct IosBridge;

impl IosBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl IconBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn supports_alternate_icons(&self) -> Result<bool> {
        require_support()?;
        let mtm = require_main_thread()?;
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: supportsAlternateIcons is a readonly BOOL property.
        Ok(unsafe { msg_send![&app, supportsAlternateIcons] })
    }

    fn alternate_icon_name(&self) -> Result<Option<String>> {
        require_support()?;
        let mtm = require_main_thread()?;
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: alternateIconName is a readonly, nullable NSString property.
        let name: Option<objc2::rc::Retained<NSString>> =
            unsafe { msg_send![&app, alternateIconName] };
        Ok(name.map(|n| n.to_string()))
    }

    fn set_alternate_icon_name(
        &self,
        icon_name: Option<&str>,
        show_alert: bool,
        done: SwitchCompletion,
    ) {
        if let Err(err) = require_support() {
            done(Err(err));
            return;
        }
        let mtm = match require_main_thread() {
            Ok(mtm) => mtm,
            Err(err) => {
                done(Err(err));
                return;
            }
        };
        let app = UIApplication::sharedApplication(mtm);
        let name = icon_name.map(NSString::from_str);

        tracing::debug!(icon = ?icon_name, show_alert, "iOS: requesting icon switch");

        if show_alert {
            let block = completion_block(done);
            // SAFETY: documented UIApplication API; name is a nullable
            // NSString and the block matches ^(NSError * _Nullable).
            unsafe {
                let _: () = msg_send![
                    &app,
                    setAlternateIconName: name.as_deref(),
                    completionHandler: &*block,
                ];
            }
        } else {
            quiet::set_without_alert(&app, name.as_deref(), done);
        }
    }

    fn available_icons(&self) -> Result<BTreeSet<String>> {
        require_support()?;
        require_main_thread()?;
        Ok(declared_icons())
    }
}
