//! Type definitions for webserver
//!
//! Wire types exchanged with browser clients over HTTP and WebSocket.

use roster::RosterState;
use serde::{Deserialize, Serialize};
use shared::FilterKey;

/// Messages pushed from webserver to browser clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Full roster state after a change
    RosterSnapshot { state: RosterState },

    /// A client request could not be handled
    Error { message: String },
}

impl ClientMessage {
    pub fn snapshot(state: RosterState) -> Self {
        ClientMessage::RosterSnapshot { state }
    }
}

/// Requests from browser clients over WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    SetFilter { key: FilterKey, value: String },
    ResetFilters,
    Refresh,
}

/// Body of `PUT /api/filters/:key`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterValue {
    #[serde(default)]
    pub value: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub students: usize,
    pub loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_message_is_tagged() {
        let json = serde_json::to_value(ClientMessage::snapshot(RosterState::new())).unwrap();

        assert_eq!(json["type"], "roster_snapshot");
        assert_eq!(json["state"]["loading"], false);
        assert!(json["state"]["students"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_client_request_parsing() {
        let request: ClientRequest =
            serde_json::from_str(r#"{"type":"set_filter","key":"date_joined","value":"06/03/2024"}"#).unwrap();
        assert_eq!(
            request,
            ClientRequest::SetFilter {
                key: FilterKey::DateJoined,
                value: "06/03/2024".to_string(),
            }
        );

        let reset: ClientRequest = serde_json::from_str(r#"{"type":"reset_filters"}"#).unwrap();
        assert_eq!(reset, ClientRequest::ResetFilters);

        assert!(serde_json::from_str::<ClientRequest>(r#"{"type":"set_filter","key":"grade","value":""}"#).is_err());
    }
}
