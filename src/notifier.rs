use tracing::{debug, error, info, warn};

use crate::Result;
use crate::config::HelpdeskSettings;
use crate::event::{Event, derive_customer_identifier};
use crate::odoo_client::{NewTicket, TicketApi, TicketId, TicketQuery, TicketUpdate};
use crate::types::NotificationType;

/// What a notification run ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Created(TicketId),
    CreateFailed,
    AlreadyOpen(TicketId),
    Closed(TicketId),
    CloseFailed(TicketId),
    NoOpenTicket,
    Ignored(NotificationType),
}

/// Maps monitoring notifications onto helpdesk tickets.
pub struct Notifier<A> {
    api: A,
    helpdesk: HelpdeskSettings,
}

impl<A: TicketApi> Notifier<A> {
    pub const fn new(api: A, helpdesk: HelpdeskSettings) -> Self {
        Self { api, helpdesk }
    }

    /// Opens a ticket for a new problem or closes the one matching a recovery.
    ///
    /// Lookup failures count as "no ticket", so a problem may be ticketed twice
    /// when the search call fails. Create and close failures are logged and
    /// reported through the returned [`Outcome`].
    ///
    /// # Errors
    ///
    /// Returns an error only when the event carries no usable problem id.
    pub async fn handle(&self, event: &Event) -> Result<Outcome> {
        let customer_id = derive_customer_identifier(event.customer_raw.as_deref());
        let context = event.problem_context()?;
        let query = TicketQuery {
            customer_id,
            host_name: &event.host_name,
            problem_id: context.problem_id,
            service_name: event.service_name.as_deref(),
        };

        debug!(
            notification_type = %event.notification_type,
            kind = %event.kind,
            host = %event.host_name,
            state = event.state().unwrap_or("-"),
            problem_id = context.problem_id,
            "handling notification"
        );

        match &event.notification_type {
            NotificationType::Problem => {
                if let Some(ticket_id) = self.lookup(&query).await {
                    info!(%ticket_id, customer_id, "ticket already exists");
                    return Ok(Outcome::AlreadyOpen(ticket_id));
                }
                let request = NewTicket {
                    customer_id,
                    site: &event.site,
                    kind: event.kind,
                    host_name: &event.host_name,
                    problem_id: context.problem_id,
                    description: &context.description,
                    service_name: event.service_name.as_deref(),
                };
                match self.create_ticket(&request).await {
                    Ok(ticket_id) => Ok(Outcome::Created(ticket_id)),
                    Err(err) => {
                        error!(
                            error = %err,
                            customer_id,
                            site = request.site,
                            kind = %request.kind,
                            host = request.host_name,
                            problem_id = request.problem_id,
                            problem = request.description,
                            service = request.service_name.unwrap_or("-"),
                            "error creating ticket"
                        );
                        Ok(Outcome::CreateFailed)
                    }
                }
            }
            NotificationType::Recovery => {
                let Some(ticket_id) = self.lookup(&query).await else {
                    debug!(host = %event.host_name, problem_id = context.problem_id, "no open ticket to close");
                    return Ok(Outcome::NoOpenTicket);
                };
                match self.close_ticket(ticket_id).await {
                    Ok(()) => Ok(Outcome::Closed(ticket_id)),
                    Err(err) => {
                        error!(error = %err, %ticket_id, "error closing ticket");
                        Ok(Outcome::CloseFailed(ticket_id))
                    }
                }
            }
            other => {
                debug!(notification_type = %other, "notification type needs no ticket action");
                Ok(Outcome::Ignored(other.clone()))
            }
        }
    }

    /// First open ticket matching `query`.
    ///
    /// # Errors
    ///
    /// Returns the remote error unchanged; [`Notifier::handle`] downgrades it.
    pub async fn find_existing_ticket(&self, query: &TicketQuery<'_>) -> Result<Option<TicketId>> {
        let domain = query.domain(&self.helpdesk);
        let found = self.api.search(&domain).await?.first().copied();
        if let Some(ticket_id) = found {
            info!(%ticket_id, "existing ticket found");
        }
        Ok(found)
    }

    /// # Errors
    ///
    /// Returns the remote error when the ticket could not be created.
    pub async fn create_ticket(&self, request: &NewTicket<'_>) -> Result<TicketId> {
        debug!(customer_id = request.customer_id, "creating ticket");
        let ticket_id = self.api.create(&request.payload(&self.helpdesk)).await?;
        info!(%ticket_id, title = %request.title(), "ticket created");
        Ok(ticket_id)
    }

    /// Moves the ticket to the closed stage.
    ///
    /// # Errors
    ///
    /// Returns the remote error when the write is rejected.
    pub async fn close_ticket(&self, ticket_id: TicketId) -> Result<()> {
        debug!(%ticket_id, "closing ticket");
        self.api
            .write(&[ticket_id], &TicketUpdate::stage(self.helpdesk.closed_stage_id))
            .await?;
        info!(%ticket_id, stage_id = self.helpdesk.closed_stage_id, "ticket closed");
        Ok(())
    }

    /// Replaces the ticket description.
    ///
    /// # Errors
    ///
    /// Logs and returns the remote error when the write is rejected.
    pub async fn update_ticket(&self, ticket_id: TicketId, description: &str) -> Result<()> {
        debug!(%ticket_id, "updating ticket");
        if let Err(err) = self
            .api
            .write(&[ticket_id], &TicketUpdate::description(description))
            .await
        {
            error!(error = %err, %ticket_id, "error updating ticket");
            return Err(err);
        }
        info!(%ticket_id, "ticket updated");
        Ok(())
    }

    async fn lookup(&self, query: &TicketQuery<'_>) -> Option<TicketId> {
        match self.find_existing_ticket(query).await {
            Ok(found) => found,
            Err(err) => {
                warn!(
                    error = %err,
                    customer_id = query.customer_id,
                    host = query.host_name,
                    problem_id = query.problem_id,
                    service = query.service_name.unwrap_or("-"),
                    "ticket lookup failed, continuing as if none exists"
                );
                None
            }
        }
    }
}
