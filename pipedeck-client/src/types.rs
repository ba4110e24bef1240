//! Type definitions shared by the client and the panel.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a pipeline step (e.g. `commit`, `angular`).
///
/// Opaque routing key: the client never checks it against a fixed list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepName(String);

impl StepName {
    /// Steps the stock backend knows about, in dashboard order.
    pub const KNOWN: [&'static str; 9] = [
        "commit",
        "report",
        "security",
        "angular",
        "incrementals",
        "attach",
        "zip",
        "email",
        "staas",
    ];

    /// Create a step name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of [`StepName::KNOWN`].
    pub fn is_known(&self) -> bool {
        Self::KNOWN.iter().any(|known| *known == self.0)
    }

    /// Iterate over [`StepName::KNOWN`].
    pub fn known() -> impl Iterator<Item = StepName> {
        Self::KNOWN.iter().map(|s| StepName::new(*s))
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StepName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for StepName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Step-specific parameters sent as the body of a trigger request.
///
/// Serialized as a flat JSON object of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepPayload(BTreeMap<String, String>);

impl StepPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StepPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Run status of a step as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    /// Never run, idle, or a value the client does not recognise.
    #[default]
    Unknown,
    /// Currently executing.
    Running,
    /// Last run finished successfully.
    Success,
    /// Last run failed.
    Failed,
}

impl StepStatus {
    /// Parse a wire value. Total: anything unrecognised is [`StepStatus::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "RUNNING" => Self::Running,
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Get the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    /// Whether the status marks a finished run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values (null, numbers) are accepted and read as Unknown.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Self::parse).unwrap_or_default())
    }
}

/// Statuses of all steps returned by a single `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSnapshot(BTreeMap<StepName, StepStatus>);

impl StatusSnapshot {
    /// Status for a step, if the backend reported it.
    pub fn get(&self, step: &StepName) -> Option<StepStatus> {
        self.0.get(step).copied()
    }

    /// Iterate over reported steps.
    pub fn iter(&self) -> impl Iterator<Item = (&StepName, StepStatus)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Number of reported steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the backend reported no steps.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StepName, StepStatus)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (StepName, StepStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Acknowledgement of a trigger request.
///
/// The backend acknowledges receipt, not completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAck {
    /// HTTP status of the acknowledgement.
    pub status: u16,
    /// Optional message from the backend (e.g. "commit started").
    pub message: Option<String>,
}
