use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_area_id, default_closed_stage_id, default_excluded_stage_id, default_team_id,
    default_ticket_type_id,
};
use super::env::parse_value;
use super::{Config, HelpdeskSettings, HumantimeDuration, OdooSettings};

/// Notification plugin parameters as configured in the Check_MK rule.
pub(super) const URL_VAR: &str = "NOTIFY_PARAMETER_1";
pub(super) const DATABASE_VAR: &str = "NOTIFY_PARAMETER_2";
pub(super) const UID_VAR: &str = "NOTIFY_PARAMETER_3";
pub(super) const API_KEY_VAR: &str = "NOTIFY_PARAMETER_4";

pub(super) fn load(path: Option<&Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(::config::File::from(path).required(true));
    }
    builder = builder.add_source(
        ::config::Environment::with_prefix("ODOO_NOTIFY")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) odoo: RawOdoo,
    #[serde(default)]
    pub(super) helpdesk: RawHelpdesk,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawOdoo {
    pub(super) url: Option<String>,
    pub(super) database: Option<String>,
    pub(super) uid: Option<i64>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) allow_http: bool,
    #[serde(default)]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) timeout: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "Option<HumantimeDuration>")]
    pub(super) connect_timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawHelpdesk {
    #[serde(default = "default_area_id")]
    pub(super) area_id: i64,
    #[serde(default = "default_team_id")]
    pub(super) team_id: i64,
    #[serde(default = "default_ticket_type_id")]
    pub(super) ticket_type_id: i64,
    #[serde(default = "default_closed_stage_id")]
    pub(super) closed_stage_id: i64,
    #[serde(default = "default_excluded_stage_id")]
    pub(super) excluded_stage_id: i64,
}

impl RawConfig {
    /// Applies the Check_MK plugin parameters on top of file and prefixed env values.
    pub(super) fn apply_overrides<F>(&mut self, lookup: F) -> std::result::Result<(), ConfigError>
    where
        F: Fn(&'static str) -> std::result::Result<Option<String>, ConfigError>,
    {
        if let Some(url) = lookup(URL_VAR)? {
            self.odoo.url = Some(url);
        }
        if let Some(database) = lookup(DATABASE_VAR)? {
            self.odoo.database = Some(database);
        }
        if let Some(uid) = parse_value::<i64>(UID_VAR, lookup(UID_VAR)?)? {
            self.odoo.uid = Some(uid);
        }
        if let Some(api_key) = lookup(API_KEY_VAR)? {
            self.odoo.api_key = Some(api_key);
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let url_str = self.odoo.url.ok_or(ConfigError::MissingField { field: "odoo.url" })?;
        let base_url = Url::parse(url_str.trim()).map_err(|err| ConfigError::InvalidField {
            field: "odoo.url",
            message: err.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidField {
                field: "odoo.url",
                message: format!("unsupported scheme {}", base_url.scheme()),
            }
            .into());
        }

        let database = self.odoo.database.ok_or(ConfigError::MissingField {
            field: "odoo.database",
        })?;
        if database.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "odoo.database",
                message: "database name cannot be empty".to_string(),
            }
            .into());
        }

        let uid = self
            .odoo
            .uid
            .ok_or(ConfigError::MissingField { field: "odoo.uid" })?;
        if uid <= 0 {
            return Err(ConfigError::InvalidField {
                field: "odoo.uid",
                message: format!("expected a positive user id, got {uid}"),
            }
            .into());
        }

        let api_key = self.odoo.api_key.ok_or(ConfigError::MissingField {
            field: "odoo.api_key",
        })?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "odoo.api_key",
                message: "api key cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Config {
            odoo: OdooSettings {
                base_url,
                database: database.trim().to_string(),
                uid,
                api_key: api_key.into(),
                allow_http: self.odoo.allow_http,
                timeout: self.odoo.timeout,
                connect_timeout: self.odoo.connect_timeout,
            },
            helpdesk: HelpdeskSettings {
                area_id: self.helpdesk.area_id,
                team_id: self.helpdesk.team_id,
                ticket_type_id: self.helpdesk.ticket_type_id,
                closed_stage_id: self.helpdesk.closed_stage_id,
                excluded_stage_id: self.helpdesk.excluded_stage_id,
            },
        })
    }
}

impl Default for RawHelpdesk {
    fn default() -> Self {
        Self {
            area_id: default_area_id(),
            team_id: default_team_id(),
            ticket_type_id: default_ticket_type_id(),
            closed_stage_id: default_closed_stage_id(),
            excluded_stage_id: default_excluded_stage_id(),
        }
    }
}
