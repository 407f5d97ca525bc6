mod create;
mod login;
mod ping;
mod range;
mod show;

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use worklog_core::{ApiClient, ClientConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli, cancel: CancellationToken) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    let client = Arc::new(ApiClient::new(config));

    match &cli.command {
        Command::Ping => ping::run(&client, &cancel).await,
        Command::Login { email, password } => {
            login::run(&client, email, password, &cancel, cli.pretty).await
        }
        Command::Range { days, end, filter } => {
            range::run(&client, *days, end.as_deref(), filter.as_deref(), &cancel, cli.pretty).await
        }
        Command::Show { id } => show::run(&client, *id, &cancel, cli.pretty).await,
        Command::Create {
            date,
            client: entry_client,
            site,
            action,
            ticket,
            start,
            end,
            notes,
        } => {
            let fields = create::EntryFields {
                date,
                client: entry_client.as_deref(),
                site: site.as_deref(),
                action: action.as_deref(),
                ticket: ticket.as_deref(),
                start: start.as_deref(),
                end: end.as_deref(),
                notes: notes.as_deref(),
            };
            create::run(&client, fields, &cancel, cli.pretty).await
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
