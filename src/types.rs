use std::fmt::{self, Display};
use std::str::FromStr;

/// What the notification is about, as reported in `NOTIFY_WHAT`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    Host,
    Service,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "HOST",
            Self::Service => "SERVICE",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "HOST" => Ok(Self::Host),
            "SERVICE" => Ok(Self::Service),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotificationType {
    Problem,
    Recovery,
    /// Acknowledgements, flapping, downtime and anything else; never acted upon.
    Other(String),
}

impl NotificationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Problem => "PROBLEM",
            Self::Recovery => "RECOVERY",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NotificationType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "PROBLEM" => Self::Problem,
            "RECOVERY" => Self::Recovery,
            other => Self::Other(other.to_string()),
        }
    }
}
