use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::EventError;
use crate::types::{EventKind, NotificationType};

const NOTIFICATION_TYPE: &str = "NOTIFY_NOTIFICATIONTYPE";
const WHAT: &str = "NOTIFY_WHAT";
const SITE: &str = "OMD_SITE";
const CUSTOMER: &str = "NOTIFY_HOST_CUSTOMER";
const HOST_NAME: &str = "NOTIFY_HOSTNAME";
const SERVICE_NAME: &str = "NOTIFY_SERVICEDISPLAYNAME";
const HOST_STATE: &str = "NOTIFY_HOSTSTATE";
const SERVICE_STATE: &str = "NOTIFY_SERVICESTATE";
const HOST_OUTPUT: &str = "NOTIFY_HOSTOUTPUT";
const SERVICE_OUTPUT: &str = "NOTIFY_SERVICEOUTPUT";
const HOST_PROBLEM_ID: &str = "NOTIFY_HOSTPROBLEMID";
const SERVICE_PROBLEM_ID: &str = "NOTIFY_SERVICEPROBLEMID";
const LAST_HOST_PROBLEM_ID: &str = "NOTIFY_LASTHOSTPROBLEMID";
const LAST_SERVICE_PROBLEM_ID: &str = "NOTIFY_LASTSERVICEPROBLEMID";

/// Current problem id the core reports once the problem is already gone.
const RESOLVED_PROBLEM_ID: &str = "0";

/// One monitoring notification, as handed to the plugin by the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub notification_type: NotificationType,
    pub kind: EventKind,
    pub site: String,
    pub customer_raw: Option<String>,
    pub host_name: String,
    pub service_name: Option<String>,
    pub host_state: Option<String>,
    pub service_state: Option<String>,
    pub host_output: Option<String>,
    pub service_output: Option<String>,
    pub host_problem_id: Option<String>,
    pub service_problem_id: Option<String>,
    pub last_host_problem_id: Option<String>,
    pub last_service_problem_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemContext {
    pub problem_id: i64,
    pub description: String,
}

impl Event {
    /// Reads the notification from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Event::from_lookup`].
    pub fn from_env() -> Result<Self, EventError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the event from `lookup`; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the notification type, event kind, host name or
    /// site is missing, or when the event kind is neither `HOST` nor `SERVICE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EventError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let optional = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| optional(name).ok_or(EventError::MissingVariable { name });

        let kind = EventKind::from_str(&required(WHAT)?).map_err(EventError::UnknownKind)?;

        Ok(Self {
            notification_type: NotificationType::from(required(NOTIFICATION_TYPE)?.as_str()),
            kind,
            site: required(SITE)?,
            customer_raw: optional(CUSTOMER),
            host_name: required(HOST_NAME)?,
            service_name: optional(SERVICE_NAME),
            host_state: optional(HOST_STATE),
            service_state: optional(SERVICE_STATE),
            host_output: optional(HOST_OUTPUT),
            service_output: optional(SERVICE_OUTPUT),
            host_problem_id: optional(HOST_PROBLEM_ID),
            service_problem_id: optional(SERVICE_PROBLEM_ID),
            last_host_problem_id: optional(LAST_HOST_PROBLEM_ID),
            last_service_problem_id: optional(LAST_SERVICE_PROBLEM_ID),
        })
    }

    /// Picks the problem id and ticket description for this event's kind.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected id is missing or not an integer.
    pub fn problem_context(&self) -> Result<ProblemContext, EventError> {
        let (current_var, current, last_var, last, output) = match self.kind {
            EventKind::Host => (
                HOST_PROBLEM_ID,
                &self.host_problem_id,
                LAST_HOST_PROBLEM_ID,
                &self.last_host_problem_id,
                &self.host_output,
            ),
            EventKind::Service => (
                SERVICE_PROBLEM_ID,
                &self.service_problem_id,
                LAST_SERVICE_PROBLEM_ID,
                &self.last_service_problem_id,
                &self.service_output,
            ),
        };

        let (field, raw) = match current.as_deref() {
            Some(RESOLVED_PROBLEM_ID) => (last_var, last.as_deref()),
            other => (current_var, other),
        };
        let raw = raw.ok_or(EventError::MissingVariable { name: field })?;
        let problem_id =
            raw.trim()
                .parse::<i64>()
                .map_err(|source| EventError::InvalidProblemId {
                    field,
                    value: raw.to_string(),
                    source,
                })?;

        Ok(ProblemContext {
            problem_id,
            description: output.clone().unwrap_or_default(),
        })
    }

    /// State of the object the notification is about.
    pub fn state(&self) -> Option<&str> {
        match self.kind {
            EventKind::Host => self.host_state.as_deref(),
            EventKind::Service => self.service_state.as_deref(),
        }
    }
}

/// Extracts the partner id from a customer tag such as `acme_42`.
///
/// Returns `0`, meaning "no customer filter", when the tag is missing or its
/// last `_`-separated segment is not an integer.
pub fn derive_customer_identifier(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        debug!("environment variable {CUSTOMER} is not set");
        return 0;
    };
    let segment = raw.rsplit('_').next().unwrap_or(raw).trim();
    match segment.parse::<i64>() {
        Ok(id) => id,
        Err(err) => {
            warn!(customer = raw, error = %err, "customer id is not correctly set in the monitoring config");
            0
        }
    }
}
