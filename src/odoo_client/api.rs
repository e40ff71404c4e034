use async_trait::async_trait;

use crate::Result;

use super::models::{DomainTerm, TicketId, TicketPayload, TicketUpdate};

/// The three `helpdesk.ticket` operations the notifier relies on.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// Ids of the tickets matching `domain`, in server order.
    async fn search(&self, domain: &[DomainTerm]) -> Result<Vec<TicketId>>;

    async fn create(&self, ticket: &TicketPayload) -> Result<TicketId>;

    async fn write(&self, ids: &[TicketId], values: &TicketUpdate) -> Result<()>;
}

#[async_trait]
impl<T: TicketApi + ?Sized> TicketApi for &T {
    async fn search(&self, domain: &[DomainTerm]) -> Result<Vec<TicketId>> {
        (**self).search(domain).await
    }

    async fn create(&self, ticket: &TicketPayload) -> Result<TicketId> {
        (**self).create(ticket).await
    }

    async fn write(&self, ids: &[TicketId], values: &TicketUpdate) -> Result<()> {
        (**self).write(ids, values).await
    }
}
