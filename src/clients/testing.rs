//! Test doubles shared by the resolver tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{RequestDescriptor, Transport, TransportError, TransportResponse};
use crate::client::FluentClient;
use crate::config::ClientConfig;

/// Transport that answers every request with the same payload and records
/// what it was sent.
#[derive(Debug)]
pub struct RecordingTransport {
    payload: Value,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl RecordingTransport {
    pub fn new(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestDescriptor {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(TransportResponse::new(200, HashMap::new(), self.payload.clone()))
    }
}

/// Builds a client for `https://api.example.com` with one default header.
pub fn client_with(transport: Arc<RecordingTransport>) -> FluentClient {
    let config = ClientConfig::builder()
        .base_url("https://api.example.com")
        .header("Content-Type", "application/json")
        .transport(transport)
        .build()
        .unwrap();
    FluentClient::new(config)
}
