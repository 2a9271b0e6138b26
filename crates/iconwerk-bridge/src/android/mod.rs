// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Android has no OS-level alternate-icon API; the bridge emulates one with
// launcher-activity aliases toggled through `PackageManager`. The packaged
// manifest declares one `<activity-alias>` per icon, named
// `<package>.MainActivity.<iconName>`; whichever alias is enabled decides
// the launcher icon. The main activity itself (and an optional reserved
// `.default` alias) stand for the default icon.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. All calls complete synchronously on the
// calling thread; `show_alert` is ignored because Android never shows a
// confirmation banner — the documented path is already silent.

#![cfg(target_os = "android")]

use std::collections::BTreeSet;

use jni::JNIEnv;
use jni::objects::{JObject, JString, JValue};

use iconwerk_core::error::{IconwerkError, Result};

use crate::traits::{IconBridge, SwitchCompletion};

/// Class-name suffix of the host application's launcher activity.
const MAIN_ACTIVITY_SUFFIX: &str = ".MainActivity";

/// Reserved alias suffix standing for the default icon.
const DEFAULT_ALIAS_SUFFIX: &str = ".default";

const ACTION_MAIN: &str = "android.intent.action.MAIN";
const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

// PackageManager constants (android.content.pm.PackageManager).
const COMPONENT_ENABLED_STATE_DEFAULT: i32 = 0;
const COMPONENT_ENABLED_STATE_ENABLED: i32 = 1;
const COMPONENT_ENABLED_STATE_DISABLED: i32 = 2;
const DONT_KILL_APP: i32 = 1;
/// `GET_DISABLED_COMPONENTS` — aliases for inactive icons are disabled and
/// must still show up in queries.
const MATCH_DISABLED_COMPONENTS: i32 = 512;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Obtain a [`JNIEnv`] handle from the global Android context.
///
/// Calls `ndk_context::android_context()` to retrieve the `JavaVM*` pointer
/// set by `android_main` or `ANativeActivity_onCreate`, then attaches the
/// current thread if it is not already attached.
fn jni_env() -> Result<JNIEnv<'static>> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| IconwerkError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    vm.attach_current_thread()
        .map_err(|e| IconwerkError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(IconwerkError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `IconwerkError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> IconwerkError {
    IconwerkError::Bridge(format!("{context}: {e}"))
}

/// Clear a pending Java exception so later JNI calls stay usable.
fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}

// ---------------------------------------------------------------------------
// PackageManager plumbing
// ---------------------------------------------------------------------------

fn package_name(env: &mut JNIEnv, activity: &JObject) -> Result<String> {
    let name: JObject = env
        .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err("getPackageName", e))?
        .l()
        .map_err(|e| jni_err("getPackageName->l", e))?;
    let name = JString::from(name);
    Ok(env
        .get_string(&name)
        .map_err(|e| jni_err("get_string(packageName)", e))?
        .into())
}

fn package_manager<'a>(env: &mut JNIEnv<'a>, activity: &JObject) -> Result<JObject<'a>> {
    env.call_method(
        activity,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )
    .map_err(|e| jni_err("getPackageManager", e))?
    .l()
    .map_err(|e| jni_err("getPackageManager->l", e))
}

/// Construct a `ComponentName` for a fully-qualified class in this package.
fn component<'a>(env: &mut JNIEnv<'a>, package: &str, class: &str) -> Result<JObject<'a>> {
    let j_package = env
        .new_string(package)
        .map_err(|e| jni_err("new_string(package)", e))?;
    let j_class = env
        .new_string(class)
        .map_err(|e| jni_err("new_string(class)", e))?;
    env.new_object(
        "android/content/ComponentName",
        "(Ljava/lang/String;Ljava/lang/String;)V",
        &[JValue::Object(&j_package), JValue::Object(&j_class)],
    )
    .map_err(|e| jni_err("new ComponentName", e))
}

fn enabled_setting(env: &mut JNIEnv, pm: &JObject, component: &JObject) -> Result<i32> {
    env.call_method(
        pm,
        "getComponentEnabledSetting",
        "(Landroid/content/ComponentName;)I",
        &[JValue::Object(component)],
    )
    .map_err(|e| jni_err("getComponentEnabledSetting", e))?
    .i()
    .map_err(|e| jni_err("getComponentEnabledSetting->i", e))
}

fn set_enabled(env: &mut JNIEnv, pm: &JObject, component: &JObject, state: i32) -> Result<()> {
    env.call_method(
        pm,
        "setComponentEnabledSetting",
        "(Landroid/content/ComponentName;II)V",
        &[
            JValue::Object(component),
            JValue::Int(state),
            JValue::Int(DONT_KILL_APP),
        ],
    )
    .map_err(|e| jni_err("setComponentEnabledSetting", e))?;
    Ok(())
}

/// Whether a component is declared in the manifest at all. `getActivityInfo`
/// throws `NameNotFoundException` for undeclared components; the exception
/// is cleared and read as "does not exist".
fn component_exists(env: &mut JNIEnv, pm: &JObject, component: &JObject) -> bool {
    let found = env
        .call_method(
            pm,
            "getActivityInfo",
            "(Landroid/content/ComponentName;I)Landroid/content/pm/ActivityInfo;",
            &[JValue::Object(component), JValue::Int(MATCH_DISABLED_COMPONENTS)],
        )
        .is_ok();
    clear_exception(env);
    found
}

/// Discover declared icon aliases by querying this package's MAIN/LAUNCHER
/// activities (disabled ones included) and collecting the alias suffixes.
/// The main activity and the reserved `.default` alias are skipped.
fn declared_icons(env: &mut JNIEnv, activity: &JObject) -> Result<BTreeSet<String>> {
    let package = package_name(env, activity)?;
    let pm = package_manager(env, activity)?;

    let j_action = env
        .new_string(ACTION_MAIN)
        .map_err(|e| jni_err("new_string(action)", e))?;
    let intent = env
        .new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_action)],
        )
        .map_err(|e| jni_err("new Intent", e))?;

    let j_category = env
        .new_string(CATEGORY_LAUNCHER)
        .map_err(|e| jni_err("new_string(category)", e))?;
    env.call_method(
        &intent,
        "addCategory",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_category)],
    )
    .map_err(|e| jni_err("Intent.addCategory", e))?;

    let j_package = env
        .new_string(&package)
        .map_err(|e| jni_err("new_string(package)", e))?;
    env.call_method(
        &intent,
        "setPackage",
        "(Ljava/lang/String;)Landroid/content/Intent;",
        &[JValue::Object(&j_package)],
    )
    .map_err(|e| jni_err("Intent.setPackage", e))?;

    let resolved: JObject = env
        .call_method(
            &pm,
            "queryIntentActivities",
            "(Landroid/content/Intent;I)Ljava/util/List;",
            &[JValue::Object(&intent), JValue::Int(MATCH_DISABLED_COMPONENTS)],
        )
        .map_err(|e| jni_err("queryIntentActivities", e))?
        .l()
        .map_err(|e| jni_err("queryIntentActivities->l", e))?;

    let count = env
        .call_method(&resolved, "size", "()I", &[])
        .map_err(|e| jni_err("List.size", e))?
        .i()
        .map_err(|e| jni_err("List.size->i", e))?;

    let alias_prefix = format!("{package}{MAIN_ACTIVITY_SUFFIX}.");
    let mut names = BTreeSet::new();

    for i in 0..count {
        let resolve_info: JObject = env
            .call_method(&resolved, "get", "(I)Ljava/lang/Object;", &[JValue::Int(i)])
            .map_err(|e| jni_err("List.get", e))?
            .l()
            .map_err(|e| jni_err("List.get->l", e))?;

        let activity_info: JObject = env
            .get_field(
                &resolve_info,
                "activityInfo",
                "Landroid/content/pm/ActivityInfo;",
            )
            .map_err(|e| jni_err("ResolveInfo.activityInfo", e))?
            .l()
            .map_err(|e| jni_err("ResolveInfo.activityInfo->l", e))?;

        let class_obj: JObject = env
            .get_field(&activity_info, "name", "Ljava/lang/String;")
            .map_err(|e| jni_err("ActivityInfo.name", e))?
            .l()
            .map_err(|e| jni_err("ActivityInfo.name->l", e))?;
        let class_name: String = env
            .get_string(&JString::from(class_obj))
            .map_err(|e| jni_err("get_string(ActivityInfo.name)", e))?
            .into();

        if let Some(suffix) = class_name.strip_prefix(&alias_prefix) {
            if suffix != "default" {
                names.insert(suffix.to_owned());
            }
        }
    }

    Ok(names)
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the icon bridge.
///
/// Zero-sized; all state lives in `PackageManager`'s component-enabled
/// settings, which persist across process restarts.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge. Does **not** touch JNI — the first JNI
    /// call happens lazily when an operation is invoked.
    pub fn new() -> Self {
        Self
    }

    fn current_icon(&self) -> Result<Option<String>> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let package = package_name(&mut env, &activity)?;
        let pm = package_manager(&mut env, &activity)?;

        // Main activity enabled (or left at its manifest default) means the
        // default icon is active.
        let main = component(&mut env, &package, &format!("{package}{MAIN_ACTIVITY_SUFFIX}"))?;
        let main_state = enabled_setting(&mut env, &pm, &main)?;
        if main_state == COMPONENT_ENABLED_STATE_ENABLED
            || main_state == COMPONENT_ENABLED_STATE_DEFAULT
        {
            return Ok(None);
        }

        // Same for the reserved `.default` alias, when declared.
        let default_alias = component(
            &mut env,
            &package,
            &format!("{package}{MAIN_ACTIVITY_SUFFIX}{DEFAULT_ALIAS_SUFFIX}"),
        )?;
        if component_exists(&mut env, &pm, &default_alias)
            && enabled_setting(&mut env, &pm, &default_alias)? == COMPONENT_ENABLED_STATE_ENABLED
        {
            return Ok(None);
        }

        for icon in declared_icons(&mut env, &activity)? {
            let alias = component(
                &mut env,
                &package,
                &format!("{package}{MAIN_ACTIVITY_SUFFIX}.{icon}"),
            )?;
            if enabled_setting(&mut env, &pm, &alias)? == COMPONENT_ENABLED_STATE_ENABLED {
                return Ok(Some(icon));
            }
        }

        Ok(None)
    }

    fn switch_icon(&self, icon_name: Option<&str>) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let package = package_name(&mut env, &activity)?;
        let pm = package_manager(&mut env, &activity)?;
        let declared = declared_icons(&mut env, &activity)?;

        tracing::info!(icon = ?icon_name, "Android: switching launcher alias");

        // Empty string and absent both restore the default icon.
        let target = icon_name.filter(|name| !name.is_empty());

        if let Some(name) = target {
            if !declared.contains(name) {
                let names: Vec<&str> = declared.iter().map(String::as_str).collect();
                return Err(IconwerkError::SetIconFailed(format!(
                    "icon '{name}' not found, declared icons: {names:?}"
                )));
            }
        }

        // Disable everything first so exactly one launcher entry survives.
        let default_alias = component(
            &mut env,
            &package,
            &format!("{package}{MAIN_ACTIVITY_SUFFIX}{DEFAULT_ALIAS_SUFFIX}"),
        )?;
        if component_exists(&mut env, &pm, &default_alias) {
            set_enabled(&mut env, &pm, &default_alias, COMPONENT_ENABLED_STATE_DISABLED)?;
        }

        let main = component(&mut env, &package, &format!("{package}{MAIN_ACTIVITY_SUFFIX}"))?;
        set_enabled(&mut env, &pm, &main, COMPONENT_ENABLED_STATE_DISABLED)?;

        for icon in &declared {
            let alias = component(
                &mut env,
                &package,
                &format!("{package}{MAIN_ACTIVITY_SUFFIX}.{icon}"),
            )?;
            set_enabled(&mut env, &pm, &alias, COMPONENT_ENABLED_STATE_DISABLED)?;
        }

        match target {
            None => set_enabled(&mut env, &pm, &main, COMPONENT_ENABLED_STATE_ENABLED),
            Some(name) => {
                let alias = component(
                    &mut env,
                    &package,
                    &format!("{package}{MAIN_ACTIVITY_SUFFIX}.{name}"),
                )?;
                set_enabled(&mut env, &pm, &alias, COMPONENT_ENABLED_STATE_ENABLED)
            }
        }
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl IconBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn supports_alternate_icons(&self) -> Result<bool> {
        // The alias emulation works on every supported Android version.
        Ok(true)
    }

    fn alternate_icon_name(&self) -> Result<Option<String>> {
        self.current_icon()
    }

    fn set_alternate_icon_name(
        &self,
        icon_name: Option<&str>,
        _show_alert: bool,
        done: SwitchCompletion,
    ) {
        // Synchronous completion; switch failures (JNI plumbing included)
        // all surface as SetIconFailed on this path.
        done(self.switch_icon(icon_name).map_err(|e| match e {
            IconwerkError::Bridge(msg) => IconwerkError::SetIconFailed(msg),
            other => other,
        }));
    }

    fn available_icons(&self) -> Result<BTreeSet<String>> {
        let mut env = jni_env()?;
        let activity = activity()?;
        declared_icons(&mut env, &activity)
    }
}
