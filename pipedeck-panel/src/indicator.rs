//! Visual markers for step status.

use pipedeck_client::StepStatus;
use std::fmt;

/// Marker shown next to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Indicator {
    /// Not running, never run, or status not recognised.
    #[default]
    Idle,
    /// Step is running.
    InProgress,
    /// Last run succeeded.
    Ok,
    /// Last run failed.
    Error,
}

impl Indicator {
    /// Map a status to its marker. Every status has one.
    pub fn for_status(status: StepStatus) -> Self {
        match status {
            StepStatus::Running => Self::InProgress,
            StepStatus::Success => Self::Ok,
            StepStatus::Failed => Self::Error,
            StepStatus::Unknown => Self::Idle,
        }
    }

    /// Glyph used by the dashboard.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Idle => "\u{26AA}",
            Self::InProgress => "\u{1F7E1}",
            Self::Ok => "\u{1F7E2}",
            Self::Error => "\u{1F534}",
        }
    }

    /// Plain-text label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InProgress => "in progress",
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

impl From<StepStatus> for Indicator {
    fn from(status: StepStatus) -> Self {
        Self::for_status(status)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
