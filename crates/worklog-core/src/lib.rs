//! # Worklog Core
//!
//! Data-access layer for the worklog time-tracking client: a typed HTTP
//! client with observability and secret redaction, a normalized error
//! taxonomy, a mutable client-side response cache for optimistic updates, and
//! a bounded-concurrency day-range aggregator.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Path-keyed response cache with explicit write-side patching |
//! | [`client`] | Typed GET/POST/PUT/DELETE/login/ping surface |
//! | [`codec`] | Case-insensitive JSON reads, null-omitting writes |
//! | [`config`] | Server location and request defaults |
//! | [`error`] | `ApiError` / connectivity taxonomy |
//! | [`logging`] | Redacting log decorator around the transport |
//! | [`models`] | Work entries and login types |
//! | [`range`] | Bounded parallel day-range loads, filter, sort, debounce |
//! | [`redact`] | Secret redaction for logged headers and bodies |
//! | [`session`] | Per-process token + cache context |
//! | [`transport`] | HTTP transport trait and reqwest implementation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use worklog_core::{ApiClient, ClientConfig, RangeLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new(ClientConfig::from_env()));
//!     let cancel = CancellationToken::new();
//!
//!     client.login("tech@example.test", "secret", &cancel).await?;
//!
//!     let loader = RangeLoader::new(Arc::clone(&client));
//!     let today = time::OffsetDateTime::now_utc().date();
//!     let outcome = loader.load_range(today, 30).await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Server-answered failures surface as [`ApiError`] (status, path, and any
//! server-provided text); transport failures surface as
//! [`ClientError::Connectivity`]. A 2xx body that does not decode is returned
//! as `None`, never as an error. Per-day fetch failures inside [`RangeLoader`]
//! are absorbed so one bad day cannot blank a whole range.
//!
//! ## Security
//!
//! Credentials and tokens never reach the log: the [`logging`] decorator
//! redacts secret-bearing headers and JSON keys on copies, leaving the wire
//! bytes untouched.

pub mod cache;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod range;
pub mod redact;
pub mod session;
pub mod transport;

pub use cache::ResponseCache;
pub use client::{normalize_path, ApiClient, HEALTH_PATHS};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError};
pub use logging::LoggingTransport;
pub use models::{
    format_iso_date, parse_iso_date, LoginOutcome, LoginRequest, LoginResponse, WorkEntry,
};
pub use range::{
    day_entries_path, filter_entries, sort_entries, FilterDebouncer, LoadOutcome, LoadState,
    RangeLoader, DAY_FETCH_CONCURRENCY, DEBOUNCE_DELAY, DEFAULT_WINDOW_DAYS, ENTRIES_PATH,
};
pub use session::{Session, COOKIE_SESSION_TOKEN};
pub use transport::{
    Method, NoopTransport, ReqwestTransport, Transport, TransportError, TransportRequest,
    TransportResponse,
};
