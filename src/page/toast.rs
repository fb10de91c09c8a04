//! Top-of-page toast notification
//!
//! Showing a toast cancels any pending hide, so the latest message always
//! stays up for its full duration.

use crate::page::{Document, PageError, PageResult};
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_TOAST_ID: &str = "toast-notification";
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);
/// Duration used for failure messages
pub const FAILURE_DURATION: Duration = Duration::from_millis(3000);

/// Delay before the `show` class is re-added so the enter transition replays
const SHOW_DELAY: Duration = Duration::from_millis(10);
const SHOW_CLASS: &str = "show";

pub struct Toast {
    document: Arc<dyn Document>,
    element_id: String,
    pending: ParkingMutex<Option<JoinHandle<()>>>,
}

impl Toast {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self::with_element(document, DEFAULT_TOAST_ID)
    }

    pub fn with_element(document: Arc<dyn Document>, element_id: impl Into<String>) -> Self {
        Self {
            document,
            element_id: element_id.into(),
            pending: ParkingMutex::new(None),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Show `message` for `duration`
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str, duration: Duration) -> PageResult<()> {
        if !self.document.has_element(&self.element_id) {
            tracing::error!("Toast element '{}' is missing from the page", self.element_id);
            return Err(PageError::MissingElement(self.element_id.clone()));
        }

        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }

        self.document.set_content(&self.element_id, message)?;
        self.document.set_class(&self.element_id, SHOW_CLASS, false)?;

        let document = self.document.clone();
        let element_id = self.element_id.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(SHOW_DELAY).await;
            if let Err(e) = document.set_class(&element_id, SHOW_CLASS, true) {
                tracing::warn!("Failed to show toast: {}", e);
                return;
            }

            tokio::time::sleep(duration.saturating_sub(SHOW_DELAY)).await;
            if let Err(e) = document.set_class(&element_id, SHOW_CLASS, false) {
                tracing::warn!("Failed to hide toast: {}", e);
            }
        });
        *self.pending.lock() = Some(task);

        tracing::debug!("Toast: {} ({:?})", message, duration);
        Ok(())
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        if let Some(task) = self.pending.lock().take() {
            task.abort();
        }
    }
}
