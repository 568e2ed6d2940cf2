//! Coin reward API client.
//!
//! # Architecture
//!
//! - [`CoinClient`] - Session client exposing the four coin operations
//! - [`envelope`] - `{code, msg}` envelope classification applied to every response
//! - [`Transport`] - Async seam for sending requests; [`ReqwestTransport`] in production
//! - [`ApiError`] - Error type shared by all operations
//!
//! # Example
//!
//! ```no_run
//! use coinbot_core::api::{CheckinOutcome, CoinClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CoinClient::new("SPC_EC=...; shopee_webUnique_ccd=...")?;
//! match client.checkin().await? {
//!     CheckinOutcome::Rewarded(coins) => println!("+{coins} coins"),
//!     CheckinOutcome::NoReward => println!("nothing to claim"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod envelope;
mod error;
mod headers;
mod models;
mod transport;

pub use client::{CoinClient, DEFAULT_BASE_URL};
pub use envelope::{Classification, Envelope, classify};
pub use error::ApiError;
pub use models::{CHECKIN_WINDOW_DAYS, CheckinHistory, CheckinOutcome};
pub use transport::{
    ApiRequest, ClientTimeouts, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, Method,
    ReqwestTransport, Transport,
};
