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

use crate::chat::{NormalizedMessage, normalize_message};
use crate::error::AppError;
use anyhow::Context as _;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Smallest delay between feed items; a zero interval would spin.
const MIN_FEED_INTERVAL: Duration = Duration::from_millis(1);

/// One item of incoming content.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Message(NormalizedMessage),
    Log(String),
}

pub enum FeedSource {
    /// Endless generated conversation and gateway log.
    Synthetic,
    /// Items from a replay script, played once.
    Script(Vec<FeedEvent>),
}

impl FeedSource {
    fn into_events(self) -> Box<dyn Iterator<Item = FeedEvent>> {
        match self {
            Self::Synthetic => Box::new(SyntheticFeed::default()),
            Self::Script(events) => Box::new(events.into_iter()),
        }
    }
}

/// Read a JSONL replay script. Each non-blank line is either a message object
/// (normalized like gateway messages) or `{"log": "..."}`.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<FeedEvent>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            AppError::ScriptNotFound
        } else {
            AppError::InvalidScript
        };
        anyhow::Error::new(kind).context(format!("failed to read {}: {e}", path.display()))
    })?;
    let events = parse_script(&raw)
        .with_context(|| format!("failed to parse replay script {}", path.display()))?;
    tracing::info!(path = %path.display(), items = events.len(), "loaded replay script");
    Ok(events)
}

pub fn parse_script(raw: &str) -> anyhow::Result<Vec<FeedEvent>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_script_line(line).map_err(|reason| {
                anyhow::Error::new(AppError::InvalidScript)
                    .context(format!("line {}: {reason}", index + 1))
            })
        })
        .collect()
}

fn parse_script_line(line: &str) -> Result<FeedEvent, String> {
    let value: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_owned());
    }
    if let Some(log) = value.get("log").and_then(Value::as_str) {
        return Ok(FeedEvent::Log(log.to_owned()));
    }
    Ok(FeedEvent::Message(normalize_message(&value)))
}

/// Deliver `source` into `tx`, one item per `interval`, until the source runs
/// dry or the receiver goes away. Must run inside a `LocalSet`.
pub fn spawn_feed(
    tx: mpsc::UnboundedSender<FeedEvent>,
    source: FeedSource,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_local(async move {
        let mut ticker = tokio::time::interval(interval.max(MIN_FEED_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        for event in source.into_events() {
            ticker.tick().await;
            if tx.send(event).is_err() {
                tracing::debug!("feed receiver closed");
                return;
            }
        }
        tracing::info!("feed finished");
    })
}

/// Generated traffic: a user question, a multi-line answer, a tool result,
/// with gateway log lines in between.
#[derive(Debug, Default)]
pub struct SyntheticFeed {
    step: u64,
}

impl Iterator for SyntheticFeed {
    type Item = FeedEvent;

    fn next(&mut self) -> Option<FeedEvent> {
        let step = self.step;
        self.step += 1;
        let turn = step / 6 + 1;
        let event = match step % 6 {
            0 => message(&json!({
                "role": "user",
                "content": format!("Question {turn}: how does the build look?"),
            })),
            2 => {
                let lines: Vec<String> = (0..=turn % 5)
                    .map(|line| format!("Step {}: checked module {} of the build.", line + 1, turn))
                    .collect();
                message(&json!({ "role": "assistant", "content": lines.join("\n") }))
            }
            4 => message(&json!({
                "role": "assistant",
                "toolCallId": format!("call-{turn}"),
                "content": [{
                    "type": "tool_result",
                    "text": json!({ "file": "src/lib.rs", "turn": turn, "warnings": turn % 3 })
                        .to_string(),
                }],
            })),
            _ => FeedEvent::Log(format!(
                "{} INFO gateway: request {step} completed in {}ms",
                chrono::Utc::now().format("%H:%M:%S"),
                20 + (step * 37) % 300
            )),
        };
        Some(event)
    }
}

fn message(raw: &Value) -> FeedEvent {
    FeedEvent::Message(normalize_message(raw))
}
