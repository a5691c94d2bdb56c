// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower logging layer for the provider client.
//!
//! Every JSON-RPC call runs inside an `rpc_call` span carrying the method
//! name; its duration and outcome are logged when the call completes. Request
//! and response bodies are never logged, since the endpoint and payloads can
//! carry credentials and large page bodies.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, warn, Instrument};

/// A Tower layer that records provider calls with `tracing`.
///
/// # Example
///
/// ```rust,ignore
/// use transferscan::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new())
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LoggingLayer {
    enabled: bool,
}

impl LoggingLayer {
    /// Creates an enabled logging layer.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Creates a layer that passes calls through without logging.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether calls are logged.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            enabled: self.enabled,
        }
    }
}

/// A Tower service that logs provider calls.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    enabled: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let mut service = self.service.clone();

        if !self.enabled {
            return Box::pin(async move { service.call(request).await });
        }

        let method = method_name(&request);
        let span = tracing::debug_span!("rpc_call", method = %method);

        Box::pin(
            async move {
                let start = Instant::now();
                debug!("Sending provider request");

                let result = service.call(request).await;
                let duration_ms = start.elapsed().as_millis() as u64;

                match &result {
                    Ok(_) => debug!(duration_ms, "Provider request completed"),
                    Err(e) => warn!(error = %e, duration_ms, "Provider request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name of a request packet, for span labels.
fn method_name(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
