use notify_odoo::Result;
use notify_odoo::config::Config;
use notify_odoo::dry_run::DryRun;
use notify_odoo::event::Event;
use notify_odoo::notifier::{Notifier, Outcome};
use notify_odoo::odoo_client::OdooClient;
use tracing::{debug, info};

use super::cli::Cli;

pub async fn run(cli: &Cli) -> Result<Outcome> {
    let config = Config::load(cli.config.as_deref())?;
    let event = Event::from_env()?;
    debug!(
        notification_type = %event.notification_type,
        kind = %event.kind,
        host = %event.host_name,
        service = event.service_name.as_deref().unwrap_or("-"),
        site = %event.site,
        "notification received"
    );

    let client = OdooClient::new(&config.odoo, cli.insecure)?;
    let outcome = if cli.dry_run {
        Notifier::new(DryRun::new(client), config.helpdesk)
            .handle(&event)
            .await?
    } else {
        Notifier::new(client, config.helpdesk).handle(&event).await?
    };

    info!(?outcome, host = %event.host_name, "notification handled");
    Ok(outcome)
}
