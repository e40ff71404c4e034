use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error as NotifyError;

mod defaults;
mod env;
mod raw;
mod serde;

use self::serde::HumantimeDuration;

/// Settings for one notification run. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub odoo: OdooSettings,
    pub helpdesk: HelpdeskSettings,
}

#[derive(Debug, Clone)]
pub struct OdooSettings {
    pub base_url: Url,
    pub database: String,
    pub uid: i64,
    pub api_key: SecretString,
    /// Accept a plain `http://` base URL.
    pub allow_http: bool,
    /// Whole-request timeout; `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

/// Record ids the helpdesk tickets are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpdeskSettings {
    pub area_id: i64,
    pub team_id: i64,
    pub ticket_type_id: i64,
    /// Stage a ticket is moved to on recovery.
    pub closed_stage_id: i64,
    /// Stage ignored when looking for an open ticket.
    pub excluded_stage_id: i64,
}

impl Config {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Precedence, lowest first: built-in defaults, the file, `ODOO_NOTIFY__*`
    /// variables, then the Check_MK plugin parameters `NOTIFY_PARAMETER_1..4`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, when an
    /// override is malformed, or when a required connection value is missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(NotifyError::from)?;
        raw.apply_overrides(env::env_string)
            .map_err(NotifyError::from)?;
        raw.validate_and_build()
    }
}

impl Default for HelpdeskSettings {
    fn default() -> Self {
        Self {
            area_id: defaults::default_area_id(),
            team_id: defaults::default_team_id(),
            ticket_type_id: defaults::default_ticket_type_id(),
            closed_stage_id: defaults::default_closed_stage_id(),
            excluded_stage_id: defaults::default_excluded_stage_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HelpdeskSettings;

    #[test]
    fn helpdesk_defaults_match_the_ticketing_setup() {
        let helpdesk = HelpdeskSettings::default();
        assert_eq!(
            (
                helpdesk.area_id,
                helpdesk.team_id,
                helpdesk.ticket_type_id,
                helpdesk.closed_stage_id,
                helpdesk.excluded_stage_id
            ),
            (1, 5, 6, 69, 68)
        );
    }
}
