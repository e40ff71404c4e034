use async_trait::async_trait;
use serde_json::{Value, json};

use crate::Result;

use super::OdooClient;
use super::api::TicketApi;
use super::models::{DomainTerm, TICKET_MODEL, TicketId, TicketPayload, TicketUpdate};

#[async_trait]
impl TicketApi for OdooClient {
    async fn search(&self, domain: &[DomainTerm]) -> Result<Vec<TicketId>> {
        self.execute_kw(TICKET_MODEL, "search", json!([domain])).await
    }

    async fn create(&self, ticket: &TicketPayload) -> Result<TicketId> {
        self.execute_kw(TICKET_MODEL, "create", json!([ticket])).await
    }

    async fn write(&self, ids: &[TicketId], values: &TicketUpdate) -> Result<()> {
        let _: Value = self
            .execute_kw(TICKET_MODEL, "write", json!([ids, values]))
            .await?;
        Ok(())
    }
}
