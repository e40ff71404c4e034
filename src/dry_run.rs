use async_trait::async_trait;
use tracing::info;

use crate::Result;
use crate::odoo_client::{DomainTerm, TicketApi, TicketId, TicketPayload, TicketUpdate};

/// Id reported for tickets that were never created.
pub const DRY_RUN_TICKET: TicketId = TicketId(0);

/// Passes searches through and only logs creates and writes.
pub struct DryRun<A> {
    inner: A,
}

impl<A> DryRun<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: TicketApi> TicketApi for DryRun<A> {
    async fn search(&self, domain: &[DomainTerm]) -> Result<Vec<TicketId>> {
        self.inner.search(domain).await
    }

    async fn create(&self, ticket: &TicketPayload) -> Result<TicketId> {
        info!(
            title = %ticket.name,
            host = %ticket.host_name,
            problem_id = ticket.problem_id,
            partner_id = ?ticket.partner_id,
            "dry-run: would create ticket"
        );
        Ok(DRY_RUN_TICKET)
    }

    async fn write(&self, ids: &[TicketId], values: &TicketUpdate) -> Result<()> {
        info!(
            ?ids,
            stage_id = ?values.stage_id,
            description = ?values.description,
            "dry-run: would update ticket"
        );
        Ok(())
    }
}
