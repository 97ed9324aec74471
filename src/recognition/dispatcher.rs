//! Runs recognition requests off the UI thread
//!
//! Requests are spawned onto a tokio runtime and their outcomes are handed
//! back over a channel. Nothing de-duplicates submissions: every call to
//! [`RequestDispatcher::submit`] issues its own request and outcomes arrive
//! in whatever order the server answers.

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use super::{Prediction, RecognitionError, RecognitionService};

/// Result of one submitted request
#[derive(Debug)]
pub struct RecognitionOutcome {
    pub request_id: u64,
    pub result: Result<Prediction, RecognitionError>,
}

/// Owns the async runtime and tracks requests still in flight
pub struct RequestDispatcher {
    runtime: Runtime,
    service: Arc<dyn RecognitionService>,
    sender: Sender<RecognitionOutcome>,
    receiver: Receiver<RecognitionOutcome>,
    in_flight: usize,
    next_id: u64,
}

impl RequestDispatcher {
    pub fn new(service: Arc<dyn RecognitionService>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("recognition")
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        let (sender, receiver) = unbounded();

        Ok(Self {
            runtime,
            service,
            sender,
            receiver,
            in_flight: 0,
            next_id: 1,
        })
    }

    /// Send `png` for recognition. `notify` runs on the runtime once the
    /// outcome is queued (the UI uses it to request a repaint).
    pub fn submit<F>(&mut self, png: Vec<u8>, notify: F) -> u64
    where
        F: Fn() + Send + 'static,
    {
        let request_id = self.next_id;
        self.next_id += 1;
        self.in_flight += 1;

        if self.in_flight > 1 {
            warn!(
                "Request #{} submitted while {} other(s) pending",
                request_id,
                self.in_flight - 1
            );
        }
        info!("Submitting recognition request #{}", request_id);

        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = service.predict(png).await;
            let _ = sender.send(RecognitionOutcome { request_id, result });
            notify();
        });

        request_id
    }

    /// Drain finished requests in the order they completed
    pub fn poll(&mut self) -> Vec<RecognitionOutcome> {
        let outcomes: Vec<_> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(outcomes.len());
        for outcome in &outcomes {
            debug!(
                "Request #{} finished ({})",
                outcome.request_id,
                if outcome.result.is_ok() { "ok" } else { "failed" }
            );
        }
        outcomes
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
