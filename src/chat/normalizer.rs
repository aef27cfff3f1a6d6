// sticky-scroll - Auto-follow scrolling for chat and log transcripts
// Copyright (C) 2025  The sticky-scroll contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Normalization of raw gateway chat messages into one render-ready shape.
//!
//! Gateways disagree on field names (`toolCallId` vs `tool_call_id`, string
//! vs block content), so everything here works on untyped JSON and never fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ROLE_TOOL_RESULT: &str = "toolResult";
pub const ROLE_UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

impl MessageContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: "text".to_owned(), text: Some(text.into()), name: None, args: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub role: String,
    pub content: Vec<MessageContentItem>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NormalizedMessage {
    /// Concatenated text of all text-bearing items.
    pub fn plain_text(&self) -> String {
        self.content.iter().filter_map(|item| item.text.as_deref()).collect::<Vec<_>>().join("\n")
    }

    pub fn is_tool_result(&self) -> bool {
        self.role == ROLE_TOOL_RESULT
    }
}

/// Map an arbitrary message object to a [`NormalizedMessage`].
///
/// Tool results are recognised by a tool call id, a tool name, or a
/// `tool_result` content block, even when the gateway labels them
/// `assistant`.
pub fn normalize_message(message: &Value) -> NormalizedMessage {
    let empty = Map::new();
    let fields = message.as_object().unwrap_or(&empty);

    let mut role = str_field(fields, "role").unwrap_or(ROLE_UNKNOWN).to_owned();
    if looks_like_tool_result(fields) {
        role = ROLE_TOOL_RESULT.to_owned();
    }

    let content = match fields.get("content") {
        Some(Value::String(text)) => vec![MessageContentItem::text(text.as_str())],
        Some(Value::Array(items)) => items.iter().map(normalize_content_item).collect(),
        _ => str_field(fields, "text").map(MessageContentItem::text).into_iter().collect(),
    };

    let timestamp = fields.get("timestamp").and_then(Value::as_f64).unwrap_or_else(now_millis);
    let id = str_field(fields, "id").map(str::to_owned);

    NormalizedMessage { role, content, timestamp, id }
}

/// Collapse role spellings for grouping consecutive messages.
pub fn normalize_role_for_grouping(role: &str) -> String {
    if matches!(role, "user" | "User" | "assistant" | "system") {
        return role.to_owned();
    }
    let lower = role.to_lowercase();
    if matches!(lower.as_str(), "toolresult" | "tool_result" | "tool" | "function") {
        return "tool".to_owned();
    }
    role.to_owned()
}

/// Whether the raw message's own role marks it as a tool result.
pub fn is_tool_result_message(message: &Value) -> bool {
    message
        .get("role")
        .and_then(Value::as_str)
        .is_some_and(|role| is_tool_result_kind(&role.to_lowercase()))
}

fn looks_like_tool_result(fields: &Map<String, Value>) -> bool {
    let has_str = |keys: [&str; 2]| keys.iter().any(|key| str_field(fields, key).is_some());
    let has_tool_id = has_str(["toolCallId", "tool_call_id"]);
    let has_tool_name = has_str(["toolName", "tool_name"]);
    let has_tool_content = fields.get("content").and_then(Value::as_array).is_some_and(|items| {
        items.iter().any(|item| {
            item.get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| is_tool_result_kind(&kind.to_lowercase()))
        })
    });
    has_tool_id || has_tool_content || has_tool_name
}

fn is_tool_result_kind(lower: &str) -> bool {
    matches!(lower, "toolresult" | "tool_result")
}

fn normalize_content_item(item: &Value) -> MessageContentItem {
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .filter(|kind| !kind.is_empty())
        .unwrap_or("text")
        .to_owned();
    let args = item
        .get("args")
        .filter(|args| is_truthy(args))
        .or_else(|| item.get("arguments"))
        .filter(|args| !args.is_null())
        .cloned();
    MessageContentItem {
        kind,
        text: item.get("text").and_then(Value::as_str).map(str::to_owned),
        name: item.get("name").and_then(Value::as_str).map(str::to_owned),
        args,
    }
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Truthiness as the gateway's producers use it: empty, zero and null are absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[allow(clippy::cast_precision_loss)]
fn now_millis() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}
