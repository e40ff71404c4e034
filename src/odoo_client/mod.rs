pub(crate) mod api;
pub(crate) mod client;
pub(crate) mod models;
pub(crate) mod ops;
pub(crate) mod rpc;

pub use api::TicketApi;
pub use client::OdooClient;
pub use models::{DomainTerm, NewTicket, TICKET_MODEL, TicketId, TicketPayload, TicketQuery, TicketUpdate};
