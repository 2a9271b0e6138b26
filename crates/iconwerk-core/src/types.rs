// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient per-call types for the icon method channel.
//
// Nothing here outlives a single request/response pair. A `MethodCall`
// arrives, is dispatched, and exactly one `MethodResult` leaves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::IconwerkError;

/// A single inbound call on the icon method channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Operation name, matched verbatim by the dispatcher.
    pub method: String,
    /// Optional mapping of named parameters to primitive values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: None,
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments: Some(arguments),
        }
    }

    /// Read a string argument. JSON null and a missing key both read as
    /// absent — callers pass null to mean "default icon".
    pub fn string_arg(&self, key: &str) -> Option<String> {
        self.arguments
            .as_ref()
            .and_then(|args| args.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// Read a boolean argument, absent when missing or non-boolean.
    pub fn bool_arg(&self, key: &str) -> Option<bool> {
        self.arguments
            .as_ref()
            .and_then(|args| args.get(key))
            .and_then(Value::as_bool)
    }
}

/// Success payload of a channel call.
///
/// `None` is the absent value: it is what `setAlternateIconName` returns on
/// success and what `getAlternateIconName` returns while the default icon
/// is active. On the wire it is JSON null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyValue {
    #[default]
    None,
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

/// Wire envelope for the response side of the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MethodResult {
    Success {
        #[serde(default)]
        value: ReplyValue,
    },
    Error {
        code: String,
        message: String,
    },
}

impl MethodResult {
    pub fn success(value: ReplyValue) -> Self {
        MethodResult::Success { value }
    }

    pub fn error(err: &IconwerkError) -> Self {
        MethodResult::Error {
            code: err.code().to_owned(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResult::Success { .. })
    }
}

impl From<crate::error::Result<ReplyValue>> for MethodResult {
    fn from(outcome: crate::error::Result<ReplyValue>) -> Self {
        match outcome {
            Ok(value) => MethodResult::success(value),
            Err(err) => MethodResult::error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_arg_reads_value() {
        let call =
            MethodCall::with_arguments("setAlternateIconName", json!({ "iconName": "dark" }));
        assert_eq!(call.string_arg("iconName").as_deref(), Some("dark"));
    }

    #[test]
    fn null_icon_name_reads_as_absent() {
        let call =
            MethodCall::with_arguments("setAlternateIconName", json!({ "iconName": null }));
        assert_eq!(call.string_arg("iconName"), None);
    }

    #[test]
    fn missing_arguments_read_as_absent() {
        let call = MethodCall::new("getAlternateIconName");
        assert_eq!(call.string_arg("iconName"), None);
        assert_eq!(call.bool_arg("showAlert"), None);
    }

    #[test]
    fn absent_value_serializes_to_null() {
        let result = MethodResult::success(ReplyValue::None);
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire, json!({ "status": "success", "value": null }));
    }

    #[test]
    fn error_envelope_carries_code_and_message() {
        let result = MethodResult::error(&IconwerkError::Unavailable);
        let wire = serde_json::to_value(&result).unwrap();
        assert_eq!(wire["status"], "error");
        assert_eq!(wire["code"], "Unavailable");
        assert!(wire["message"].as_str().unwrap().contains("not supported"));
    }

    #[test]
    fn list_value_round_trips() {
        let result = MethodResult::success(ReplyValue::List(vec![
            "dark".into(),
            "festive".into(),
        ]));
        let wire = serde_json::to_string(&result).unwrap();
        let back: MethodResult = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, result);
    }
}
