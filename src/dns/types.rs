use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct DnsProfile {
    pub name: String,
    pub preferred: String,
    pub alternate: String,
}

impl DnsProfile {
    pub fn new(
        name: impl Into<String>,
        preferred: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            preferred: preferred.into(),
            alternate: alternate.into(),
        }
    }

    /// The secondary server, if one was given.
    pub fn alternate(&self) -> Option<&str> {
        let alternate = self.alternate.trim();
        (!alternate.is_empty()).then_some(alternate)
    }

    pub fn display_name(&self) -> String {
        match self.alternate() {
            Some(alternate) => format!("{} ({}, {})", self.name, self.preferred, alternate),
            None => format!("{} ({})", self.name, self.preferred),
        }
    }
}

pub type ProfileList = Vec<DnsProfile>;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum StatusIndicator {
    #[default]
    Idle,
    Success,
    Error,
}

impl StatusIndicator {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusIndicator::Idle => "idle",
            StatusIndicator::Success => "success",
            StatusIndicator::Error => "error",
        }
    }
}

/// Transient toggle state. Never persisted.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ConnectionState {
    pub active_profile_name: Option<String>,
    pub connected: bool,
    pub busy: bool,
    pub status: StatusIndicator,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ToggleOutcome {
    pub connected: bool,
    pub message: String,
    pub is_error: bool,
}

impl ToggleOutcome {
    pub fn success(connected: bool, message: impl Into<String>) -> Self {
        Self {
            connected,
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(connected: bool, message: impl Into<String>) -> Self {
        Self {
            connected,
            message: message.into(),
            is_error: true,
        }
    }
}
