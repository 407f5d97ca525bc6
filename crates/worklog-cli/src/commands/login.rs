use serde_json::json;
use tokio_util::sync::CancellationToken;

use worklog_core::{ApiClient, COOKIE_SESSION_TOKEN};

use crate::commands::print_json;
use crate::error::CliError;

pub async fn run(
    client: &ApiClient,
    email: &str,
    password: &str,
    cancel: &CancellationToken,
    pretty: bool,
) -> Result<(), CliError> {
    let outcome = client.login(email, password, cancel).await?;

    // Never print the token itself; its kind is all the caller needs.
    print_json(
        &json!({
            "authenticated": true,
            "user": outcome.user,
            "cookie_session": outcome.token == COOKIE_SESSION_TOKEN,
        }),
        pretty,
    )
}
