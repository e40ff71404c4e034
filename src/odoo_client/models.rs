use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::HelpdeskSettings;
use crate::types::EventKind;

pub const TICKET_MODEL: &str = "helpdesk.ticket";

const HOSTNAME_FIELD: &str = "x_CHECKMK_HOSTNAME";
const PROBLEM_ID_FIELD: &str = "x_CHECKMK_PROBLEM_ID";
const SERVICE_NAME_FIELD: &str = "x_CHECKMK_SERVICE_NAME";

/// Database id of a `helpdesk.ticket` record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One `[field, operator, value]` term of a search domain.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DomainTerm(pub &'static str, pub &'static str, pub Value);

impl DomainTerm {
    fn equals(field: &'static str, value: impl Into<Value>) -> Self {
        Self(field, "=", value.into())
    }
}

/// Key identifying the ticket opened for one monitoring problem.
#[derive(Clone, Copy, Debug)]
pub struct TicketQuery<'a> {
    /// `0` disables the partner filter.
    pub customer_id: i64,
    pub host_name: &'a str,
    pub problem_id: i64,
    pub service_name: Option<&'a str>,
}

impl TicketQuery<'_> {
    pub fn domain(&self, helpdesk: &HelpdeskSettings) -> Vec<DomainTerm> {
        let mut domain = vec![
            DomainTerm::equals("area_id", helpdesk.area_id),
            DomainTerm::equals("team_id", helpdesk.team_id),
            DomainTerm("stage_id", "!=", json!(helpdesk.excluded_stage_id)),
            DomainTerm::equals(HOSTNAME_FIELD, self.host_name),
            DomainTerm::equals(PROBLEM_ID_FIELD, self.problem_id),
        ];
        if self.customer_id != 0 {
            domain.push(DomainTerm::equals("partner_id", self.customer_id));
        }
        if let Some(service) = self.service_name {
            domain.push(DomainTerm::equals(SERVICE_NAME_FIELD, service));
        }
        domain
    }
}

/// Everything known about a problem at the time its ticket is opened.
#[derive(Clone, Copy, Debug)]
pub struct NewTicket<'a> {
    pub customer_id: i64,
    pub site: &'a str,
    pub kind: EventKind,
    pub host_name: &'a str,
    pub problem_id: i64,
    pub description: &'a str,
    pub service_name: Option<&'a str>,
}

impl NewTicket<'_> {
    pub fn title(&self) -> String {
        match self.kind {
            EventKind::Host => format!("Ticket for {} - Host: {}", self.site, self.host_name),
            EventKind::Service => format!(
                "Ticket for {} - Host: {} - Service: {}",
                self.site,
                self.host_name,
                self.service_name.unwrap_or("<unknown>")
            ),
        }
    }

    pub fn payload(&self, helpdesk: &HelpdeskSettings) -> TicketPayload {
        TicketPayload {
            area_id: helpdesk.area_id,
            description: self.description.to_string(),
            name: self.title(),
            partner_id: (self.customer_id != 0).then_some(self.customer_id),
            put_off_email: true,
            team_id: helpdesk.team_id,
            ticket_type_id: helpdesk.ticket_type_id,
            host_name: self.host_name.to_string(),
            problem_id: self.problem_id,
            service_name: self.service_name.map(str::to_string),
        }
    }
}

/// Values sent to `helpdesk.ticket.create`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TicketPayload {
    pub area_id: i64,
    pub description: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,
    /// Keeps Odoo from mailing the customer about monitoring tickets.
    pub put_off_email: bool,
    pub team_id: i64,
    pub ticket_type_id: i64,
    #[serde(rename = "x_CHECKMK_HOSTNAME")]
    pub host_name: String,
    #[serde(rename = "x_CHECKMK_PROBLEM_ID")]
    pub problem_id: i64,
    #[serde(rename = "x_CHECKMK_SERVICE_NAME", skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

/// Values sent to `helpdesk.ticket.write`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<i64>,
}

impl TicketUpdate {
    pub const fn stage(stage_id: i64) -> Self {
        Self {
            description: None,
            stage_id: Some(stage_id),
        }
    }

    pub fn description(text: impl Into<String>) -> Self {
        Self {
            description: Some(text.into()),
            stage_id: None,
        }
    }
}
