pub mod client;
pub mod config;
pub mod errors;
pub mod logger;
pub mod ops;
pub mod query;
pub mod record;
pub mod request;
pub mod types;

use crate::client::SubmissionClient;
use crate::config::BridgeConfig;
use crate::errors::BridgeError;
use crate::record::{Record, RecordSet};
use crate::request::BridgeRequest;

/// The bridge adapter for one Core space.
///
/// Holds the space configuration and the HTTP client; every operation is
/// otherwise stateless, so one instance can serve any number of requests.
pub struct Bridge {
    client: SubmissionClient,
}

impl Bridge {
    /// Creates an adapter instance for the given space.
    ///
    /// # Errors
    /// Returns `Connection` when the HTTP client cannot be constructed.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        Ok(Self { client: SubmissionClient::new(config)? })
    }

    /// Counts all submissions matching the request, across every page.
    pub fn count(&self, request: &BridgeRequest) -> Result<usize, BridgeError> {
        ops::count_records(&self.client, request)
    }

    /// Retrieves a single submission as a record (possibly empty when
    /// nothing matched).
    pub fn retrieve(&self, request: &BridgeRequest) -> Result<Record, BridgeError> {
        ops::retrieve_record(&self.client, request)
    }

    /// Searches one page of submissions and returns shaped records plus
    /// pagination metadata.
    pub fn search(&self, request: &BridgeRequest) -> Result<RecordSet, BridgeError> {
        ops::search_records(&self.client, request)
    }
}

/// Initializes the adapter's logging.
///
/// This should be called once before any other operations; it sets up the
/// logger from `log4rs.yaml` when present.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
