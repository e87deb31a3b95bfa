//! WebSocket connection handler
//!
//! Each connection receives the current roster snapshot on connect and a new
//! snapshot after every change. Clients may send filter and refresh requests.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use roster::{RosterStore, TableStore};
use shared::{Component, component_debug, component_error, component_info, component_warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::{ClientMessage, ClientRequest};

/// WebSocket connection handler
pub async fn websocket_handler<S>(ws: WebSocketUpgrade, State(roster): State<Arc<RosterStore<S>>>) -> Response
where
    S: TableStore + 'static,
{
    ws.on_upgrade(move |socket| handle_websocket(socket, roster))
}

/// Handle individual WebSocket connection
async fn handle_websocket<S>(socket: WebSocket, roster: Arc<RosterStore<S>>)
where
    S: TableStore + 'static,
{
    let client_id = Uuid::new_v4();
    component_info!(Component::WebServer, "🔗 New WebSocket connection: {}", client_id);

    let (mut sender, mut receiver) = socket.split();
    let mut updates = roster.subscribe();

    // Replies addressed to this client only
    let (tx, mut rx) = mpsc::channel::<ClientMessage>(32);

    let outgoing_task = tokio::spawn(async move {
        let initial = ClientMessage::snapshot(updates.borrow_and_update().clone());
        if send_message(&mut sender, &initial).await.is_err() {
            return;
        }

        loop {
            let direct = tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    None
                }
                message = rx.recv() => match message {
                    Some(message) => Some(message),
                    None => break,
                },
            };

            let message = direct.unwrap_or_else(|| ClientMessage::snapshot(updates.borrow_and_update().clone()));
            if let Err(e) = send_message(&mut sender, &message).await {
                component_warn!(Component::WebServer, "Failed to send message to client {}: {}", client_id, e);
                break;
            }
        }

        component_debug!(Component::WebServer, "Outgoing message task ended for client {}", client_id);
    });

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                component_warn!(Component::WebServer, "WebSocket error for client {}: {}", client_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                component_debug!(Component::WebServer, "📨 Received from client {}: {}", client_id, text);
                match serde_json::from_str::<ClientRequest>(&text) {
                    Ok(request) => handle_client_request(request, &roster).await,
                    Err(e) => {
                        component_warn!(Component::WebServer, "Failed to parse client request from {}: {}", client_id, e);
                        let reply = ClientMessage::Error {
                            message: format!("Failed to parse request: {e}"),
                        };
                        if tx.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Message::Binary(_) => {
                component_warn!(Component::WebServer, "Received binary message from client {} - not supported", client_id);
            }
            Message::Close(_) => {
                component_debug!(Component::WebServer, "Client {} requested close", client_id);
                break;
            }
            _ => {}
        }
    }

    outgoing_task.abort();
    component_info!(Component::WebServer, "🔌 WebSocket connection ended for client: {}", client_id);
}

async fn handle_client_request<S>(request: ClientRequest, roster: &RosterStore<S>)
where
    S: TableStore + 'static,
{
    match request {
        ClientRequest::SetFilter { key, value } => roster.set_filter(key, value),
        ClientRequest::ResetFilters => roster.reset_filters(),
        ClientRequest::Refresh => roster.fetch_students().await,
    }
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    message: &ClientMessage,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            component_error!(Component::WebServer, "Failed to serialize client message: {}", e);
            return Ok(());
        }
    };

    sender.send(Message::Text(json)).await
}
