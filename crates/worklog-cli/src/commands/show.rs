use tokio_util::sync::CancellationToken;

use worklog_core::{ApiClient, WorkEntry, ENTRIES_PATH};

use crate::commands::print_json;
use crate::error::CliError;

pub async fn run(
    client: &ApiClient,
    id: u64,
    cancel: &CancellationToken,
    pretty: bool,
) -> Result<(), CliError> {
    let path = format!("{ENTRIES_PATH}/{id}");
    match client.get::<WorkEntry>(&path, cancel).await? {
        Some(entry) => print_json(&entry, pretty),
        None => {
            println!("no usable data for entry {id}");
            Ok(())
        }
    }
}
