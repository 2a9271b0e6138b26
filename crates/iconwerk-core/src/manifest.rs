// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static packaged-manifest parsing.
//
// Alternate icons are declared at packaging time, not discovered from the
// OS at runtime. On iOS the declaration lives under the bundle's
// `CFBundleIcons` / `CFBundleAlternateIcons` dictionaries; this module
// parses the JSON form of that structure for the fake adapter and for
// host-side tooling. The real iOS adapter reads the same keys straight
// from `NSBundle`.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

/// Top-level manifest key holding the icon declarations.
pub const BUNDLE_ICONS_KEY: &str = "CFBundleIcons";

/// Nested key whose child keys are the alternate icon identifiers.
pub const ALTERNATE_ICONS_KEY: &str = "CFBundleAlternateIcons";

/// The set of alternate icon identifiers declared in the application's
/// packaged manifest. Order-irrelevant; an application with no alternate
/// icons has an empty manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconManifest {
    names: BTreeSet<String>,
}

impl IconManifest {
    /// Build a manifest from explicit identifiers (tests, fake adapter).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the JSON form of the bundled icon declaration.
    ///
    /// A missing `CFBundleIcons` or `CFBundleAlternateIcons` section is not
    /// an error — it parses as the empty manifest.
    pub fn from_json_value(root: &Value) -> Self {
        let names = root
            .get(BUNDLE_ICONS_KEY)
            .and_then(|icons| icons.get(ALTERNATE_ICONS_KEY))
            .and_then(Value::as_object)
            .map(|alternates| alternates.keys().cloned().collect())
            .unwrap_or_default();
        Self { names }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)?;
        Ok(Self::from_json_value(&root))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_set(&self) -> BTreeSet<String> {
        self.names.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_declared_alternate_icons() {
        let root = json!({
            "CFBundleIcons": {
                "CFBundlePrimaryIcon": { "CFBundleIconFiles": ["AppIcon"] },
                "CFBundleAlternateIcons": {
                    "dark": { "CFBundleIconFiles": ["AppIcon-dark"] },
                    "festive": { "CFBundleIconFiles": ["AppIcon-festive"] },
                }
            }
        });
        let manifest = IconManifest::from_json_value(&root);
        let expected: std::collections::BTreeSet<String> =
            ["dark", "festive"].into_iter().map(String::from).collect();
        assert_eq!(manifest.to_set(), expected);
    }

    #[test]
    fn absent_sections_parse_as_empty() {
        assert!(IconManifest::from_json_value(&json!({})).is_empty());
        assert!(
            IconManifest::from_json_value(&json!({ "CFBundleIcons": {} })).is_empty()
        );
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icons.json");
        std::fs::write(
            &path,
            r#"{ "CFBundleIcons": { "CFBundleAlternateIcons": { "mono": {} } } }"#,
        )
        .unwrap();

        let manifest = IconManifest::from_path(&path).unwrap();
        assert!(manifest.contains("mono"));
        assert_eq!(manifest.names().count(), 1);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = IconManifest::from_json_slice(b"{ not json").unwrap_err();
        assert_eq!(err.code(), "Serialization");
    }
}
