use tokio_util::sync::CancellationToken;

use worklog_core::{
    day_entries_path, parse_iso_date, ApiClient, WorkEntry, ENTRIES_PATH,
};

use crate::commands::print_json;
use crate::error::CliError;

pub struct EntryFields<'a> {
    pub date: &'a str,
    pub client: Option<&'a str>,
    pub site: Option<&'a str>,
    pub action: Option<&'a str>,
    pub ticket: Option<&'a str>,
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub notes: Option<&'a str>,
}

pub async fn run(
    client: &ApiClient,
    fields: EntryFields<'_>,
    cancel: &CancellationToken,
    pretty: bool,
) -> Result<(), CliError> {
    let date = parse_iso_date(fields.date).map_err(|_| CliError::InvalidDate {
        value: fields.date.to_owned(),
    })?;

    let mut entry = WorkEntry::for_date(date);
    entry.client = fields.client.map(str::to_owned);
    entry.site = fields.site.map(str::to_owned);
    entry.action = fields.action.map(str::to_owned);
    entry.ticket = fields.ticket.map(str::to_owned);
    entry.start_time = fields.start.map(str::to_owned);
    entry.end_time = fields.end.map(str::to_owned);
    entry.notes = fields.notes.map(str::to_owned);

    let created: Option<WorkEntry> = client.post(ENTRIES_PATH, &entry, cancel).await?;
    let created = created.unwrap_or(entry);

    // Patch the cached day list so an already-fetched range shows the new
    // entry without a refetch.
    if let Ok(value) = serde_json::to_value(&created) {
        client
            .session()
            .cache()
            .add_item_to_list_entry(&day_entries_path(created.date), value)
            .await;
    }

    print_json(&created, pretty)
}
