use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use worklog_core::{
    filter_entries, parse_iso_date, sort_entries, ApiClient, LoadOutcome, RangeLoader,
};

use crate::commands::print_json;
use crate::error::CliError;

pub async fn run(
    client: &Arc<ApiClient>,
    days: u16,
    end: Option<&str>,
    filter: Option<&str>,
    cancel: &CancellationToken,
    pretty: bool,
) -> Result<(), CliError> {
    let end_date = match end {
        Some(value) => parse_iso_date(value).map_err(|_| CliError::InvalidDate {
            value: value.to_owned(),
        })?,
        None => time::OffsetDateTime::now_utc().date(),
    };

    let loader = RangeLoader::new(Arc::clone(client));
    let load = tokio::select! {
        _ = cancel.cancelled() => {
            loader.cancel();
            return Ok(());
        }
        outcome = loader.load_range(end_date, days) => outcome,
    };

    match load {
        LoadOutcome::Completed(merged) => {
            let mut entries = match filter {
                Some(query) => filter_entries(&merged, query),
                None => merged,
            };
            sort_entries(&mut entries);
            print_json(&entries, pretty)
        }
        LoadOutcome::Cancelled => Ok(()),
        LoadOutcome::Failed => Err(CliError::InvalidDate {
            value: format!("{days} days before the requested end date"),
        }),
    }
}
