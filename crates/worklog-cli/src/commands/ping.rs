use tokio_util::sync::CancellationToken;

use worklog_core::ApiClient;

use crate::error::CliError;

pub async fn run(client: &ApiClient, cancel: &CancellationToken) -> Result<(), CliError> {
    if client.ping(cancel).await {
        println!("server is reachable");
        Ok(())
    } else {
        Err(CliError::Unreachable)
    }
}
