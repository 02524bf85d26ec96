//! REST adapter for [`SubmissionApi`] on the `reqwest` blocking client.

use crate::config::{BasicAuth, ClientConfig};
use crate::domain::entities::{
    BatchStatus, BatchStatusItem, BatchStatusReport, DataEnvelope, ErrorEnvelope, StateItem,
};
use crate::domain::errors::ClientError;
use crate::ports::inbound::SubmissionApi;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared_types::{BatchList, StateAddress, StateEntry, WireError};
use std::time::Duration;
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Blocking REST API client.
pub struct RestSubmissionClient {
    http: Client,
    base_url: String,
    auth: Option<BasicAuth>,
    request_timeout: Duration,
}

impl RestSubmissionClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            auth: config.auth,
            request_timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full status of a batch, including invalid transaction messages.
    ///
    /// A request that times out while the server holds it is reported as
    /// `Pending`, not as an error.
    pub fn status_report(
        &self,
        batch_id: &str,
        wait_seconds: u64,
    ) -> Result<BatchStatusReport, ClientError> {
        let wait = wait_seconds.to_string();
        let request = self
            .get(&self.url("batch_status"))
            .query(&[("id", batch_id), ("wait", wait.as_str())])
            .timeout(self.request_timeout + Duration::from_secs(wait_seconds));

        let body = match self.send(request) {
            Ok(body) => body,
            Err(ClientError::Http(e)) if e.is_timeout() => {
                warn!(batch_id, "Status request timed out");
                return Ok(BatchStatusReport::without_details(batch_id, BatchStatus::Pending));
            }
            Err(e) => return Err(e),
        };

        let envelope: DataEnvelope<Vec<BatchStatusItem>> = parse(&body)?;
        let report = envelope
            .data
            .into_iter()
            .find(|item| item.id == batch_id)
            .map(|item| BatchStatusReport {
                status: BatchStatus::from_wire(&item.status),
                id: item.id,
                invalid_transactions: item.invalid_transactions,
            })
            .unwrap_or_else(|| BatchStatusReport::without_details(batch_id, BatchStatus::Unknown));

        debug!(batch_id, status = %report.status, "Batch status");
        Ok(report)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.http.get(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => request.basic_auth(&auth.user, auth.password.as_ref()),
            None => request,
        }
    }

    /// Send a request and return the body of a 2xx response.
    fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                ClientError::ServiceUnavailable(format!("Cannot connect to {}", self.base_url))
            } else {
                ClientError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text()?;
        if status.is_success() {
            return Ok(body);
        }

        let reason = remote_reason(status, &body);
        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(reason))
        } else {
            Err(ClientError::RemoteError {
                status: status.as_u16(),
                reason,
            })
        }
    }
}

impl SubmissionApi for RestSubmissionClient {
    fn submit(&self, batch_list: &[u8]) -> Result<String, ClientError> {
        let batch_id = BatchList::from_bytes(batch_list)?
            .batches
            .first()
            .map(|batch| batch.id().to_string())
            .ok_or_else(|| WireError::Decode("batch list holds no batches".into()))?;

        let request = self
            .authorize(self.http.post(self.url("batches")))
            .header("Content-Type", "application/octet-stream")
            .body(batch_list.to_vec());
        self.send(request)?;

        info!(batch_id = %batch_id, "Submitted batch");
        Ok(batch_id)
    }

    fn status(&self, batch_id: &str, wait_seconds: u64) -> Result<BatchStatus, ClientError> {
        Ok(self.status_report(batch_id, wait_seconds)?.status)
    }

    fn get_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, ClientError> {
        let request = self.get(&self.url(&format!("state/{address}")));
        match self.send(request) {
            Ok(body) => {
                let envelope: DataEnvelope<String> = parse(&body)?;
                Ok(Some(decode_base64(&envelope.data)?))
            }
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn list_state(&self, prefix: &str) -> Result<Vec<StateEntry>, ClientError> {
        let mut entries = Vec::new();
        let mut request = self.get(&self.url("state")).query(&[("address", prefix)]);

        loop {
            let page: DataEnvelope<Vec<StateItem>> = parse(&self.send(request)?)?;
            for item in page.data {
                let address = StateAddress::parse(&item.address)?;
                entries.push(StateEntry::new(address, decode_base64(&item.data)?));
            }

            match page.paging.and_then(|paging| paging.next) {
                Some(next) if !next.is_empty() => request = self.get(&next),
                _ => break,
            }
        }

        debug!(prefix, entries = entries.len(), "Listed state");
        Ok(entries)
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))
}

fn decode_base64(data: &str) -> Result<Vec<u8>, ClientError> {
    STANDARD
        .decode(data)
        .map_err(|e| ClientError::Parse(format!("invalid base64 state data: {e}")))
}

/// The server's error message if it sent one, else the status reason.
fn remote_reason(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message.or(envelope.error.title))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string())
}
