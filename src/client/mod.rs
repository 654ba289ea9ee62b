// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polling client for a SENEC appliance.
//!
//! A [`Senec`] sends its [`FieldRequest`] through a [`Protocol`], normalizes
//! the response and keeps it as the current [`Snapshot`].
//!
//! # Snapshot semantics
//!
//! - There is no snapshot until the first successful poll.
//! - A successful poll replaces the snapshot as a whole. Readers holding the
//!   previous `Arc<Snapshot>` keep seeing the old data.
//! - A failed poll returns the error and leaves the previous snapshot in
//!   place.
//! - Polls on one client run one at a time. [`Senec::poll`] waits for a poll
//!   in flight to finish; [`Senec::try_poll`] fails with
//!   [`Error::PollInProgress`] instead.
//!
//! # Examples
//!
//! ```no_run
//! use senec_lib::Senec;
//!
//! # async fn example() -> senec_lib::Result<()> {
//! let senec = Senec::http("192.168.1.120")
//!     .danger_accept_invalid_certs()
//!     .build()?;
//!
//! let snapshot = senec.poll().await?;
//! println!("house: {} W", snapshot.house_power()?);
//! println!("state: {}", snapshot.system_state()?);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http_builder;

#[cfg(feature = "http")]
pub use http_builder::HttpSenecBuilder;

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::codec::{ByteOrder, LeafDecoder};
use crate::error::Error;
use crate::protocol::Protocol;
use crate::request::FieldRequest;
use crate::snapshot::Snapshot;

/// A SENEC appliance reachable through a [`Protocol`].
#[derive(Debug)]
pub struct Senec<P: Protocol> {
    protocol: P,
    request: FieldRequest,
    decoder: LeafDecoder,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    poll_lock: Mutex<()>,
}

impl<P: Protocol> Senec<P> {
    /// Creates a client using [`FieldRequest::standard`] and little-endian
    /// leaf decoding.
    #[must_use]
    pub fn new(protocol: P) -> Self {
        Self {
            protocol,
            request: FieldRequest::standard(),
            decoder: LeafDecoder::default(),
            snapshot: RwLock::new(None),
            poll_lock: Mutex::new(()),
        }
    }

    /// Sets the request sent by [`poll`](Self::poll).
    #[must_use]
    pub fn with_request(mut self, request: FieldRequest) -> Self {
        self.request = request;
        self
    }

    /// Sets the byte order of encoded leaves.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.decoder = LeafDecoder::new(byte_order);
        self
    }

    /// Returns the request sent by [`poll`](Self::poll).
    #[must_use]
    pub fn request(&self) -> &FieldRequest {
        &self.request
    }

    /// Returns the leaf decoder.
    #[must_use]
    pub fn decoder(&self) -> LeafDecoder {
        self.decoder
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the snapshot of the last successful poll, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().clone()
    }

    /// Polls the appliance with the configured request.
    ///
    /// Waits for any poll already in flight on this client.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the appliance answers with a
    /// failure status, or the body is not a JSON object. The previous
    /// snapshot is kept.
    pub async fn poll(&self) -> Result<Arc<Snapshot>, Error> {
        let _guard = self.poll_lock.lock().await;
        self.fetch(&self.request).await
    }

    /// Polls the appliance unless a poll is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PollInProgress`] if another poll is running, or any
    /// error of [`poll`](Self::poll).
    pub async fn try_poll(&self) -> Result<Arc<Snapshot>, Error> {
        let _guard = self
            .poll_lock
            .try_lock()
            .map_err(|_| Error::PollInProgress)?;
        self.fetch(&self.request).await
    }

    /// Polls every field of every diagnostic group.
    ///
    /// The result replaces the current snapshot like any other poll. This
    /// keeps the appliance busy for a while; avoid calling it often.
    ///
    /// # Errors
    ///
    /// Same as [`poll`](Self::poll).
    pub async fn poll_all(&self) -> Result<Arc<Snapshot>, Error> {
        let _guard = self.poll_lock.lock().await;
        self.fetch(&FieldRequest::all_groups()).await
    }

    async fn fetch(&self, request: &FieldRequest) -> Result<Arc<Snapshot>, Error> {
        match self.fetch_and_publish(request).await {
            Ok(snapshot) => {
                tracing::debug!(
                    received_at = %snapshot.received_at(),
                    "Published new snapshot"
                );
                Ok(snapshot)
            }
            Err(error) => {
                tracing::warn!(%error, "Poll failed, keeping previous snapshot");
                Err(error)
            }
        }
    }

    async fn fetch_and_publish(&self, request: &FieldRequest) -> Result<Arc<Snapshot>, Error> {
        let response = self.protocol.send_request(request).await?;
        let raw = response.parse()?;
        let snapshot = Arc::new(Snapshot::new(self.decoder.normalize(raw)));

        *self.snapshot.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

#[cfg(feature = "http")]
impl Senec<crate::protocol::HttpClient> {
    /// Creates a builder for an appliance from a host string.
    ///
    /// Equivalent to `Senec::http_config(HttpConfig::new(host))`.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the appliance
    #[must_use]
    pub fn http(host: impl Into<String>) -> HttpSenecBuilder {
        HttpSenecBuilder::new(crate::protocol::HttpConfig::new(host))
    }

    /// Creates a builder from an `HttpConfig`.
    #[must_use]
    pub fn http_config(config: crate::protocol::HttpConfig) -> HttpSenecBuilder {
        HttpSenecBuilder::new(config)
    }
}
