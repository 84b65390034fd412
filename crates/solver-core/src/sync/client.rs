//! HTTP client for the remote routine store.

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::routine::{RoutineEntry, RoutinePayload};
use crate::session::SessionTicket;
use crate::sync::types::{parse_routines, SyncError};

/// Path segment every routine request goes through.
pub const ROUTINES_SEGMENT: &str = "/routines";

/// `{endpoint}/routines`, without doubling the segment if it is already there.
pub fn routines_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with(ROUTINES_SEGMENT) {
        base.to_string()
    } else {
        format!("{base}{ROUTINES_SEGMENT}")
    }
}

/// Fetch URL with the identity as a percent-encoded `userId` parameter.
pub fn fetch_url(endpoint: &str, user_id: &str) -> String {
    format!(
        "{}?userId={}",
        routines_url(endpoint),
        urlencoding::encode(user_id)
    )
}

fn parse_url(endpoint: &str, raw: &str) -> Result<Url, SyncError> {
    Url::parse(raw).map_err(|e| SyncError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Client for the routine store. Requests are only built from a
/// [`SessionTicket`], so an unready session never reaches the network.
#[derive(Clone, Default)]
pub struct SyncClient {
    http_client: Client,
}

impl SyncClient {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// GET every routine recorded for the ticket's identity.
    pub async fn fetch_routines(
        &self,
        ticket: &SessionTicket,
    ) -> Result<Vec<RoutineEntry>, SyncError> {
        let url = parse_url(&ticket.endpoint, &fetch_url(&ticket.endpoint, &ticket.identity))?;
        debug!(%url, "fetching routines");

        let resp = self.http_client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "routine fetch rejected");
            return Err(SyncError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let entries = parse_routines(&body)?;
        debug!(count = entries.len(), "routines fetched");
        Ok(entries)
    }

    /// POST one routine as JSON. Any 2xx counts as stored; the body is ignored.
    pub async fn submit_routine(
        &self,
        ticket: &SessionTicket,
        payload: &RoutinePayload,
    ) -> Result<(), SyncError> {
        let url = parse_url(&ticket.endpoint, &routines_url(&ticket.endpoint))?;
        debug!(%url, date = %payload.date, duration = payload.duration, "submitting routine");

        let resp = self.http_client.post(url).json(payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "routine submit rejected");
            return Err(SyncError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
