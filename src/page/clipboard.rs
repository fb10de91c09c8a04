//! Copy-to-clipboard with a primary and a fallback strategy
//!
//! The fallback runs when the primary is unavailable or its write fails.
//! The user only sees a failure once the fallback has failed too.

use crate::page::toast::{Toast, DEFAULT_DURATION, FAILURE_DURATION};
use crate::page::{PageError, PageResult};
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use serde::Serialize;

/// A way of putting text on the system clipboard
#[async_trait]
pub trait ClipboardStrategy: Send + Sync {
    /// Strategy name used in logs and outcomes
    fn name(&self) -> &str;

    /// Whether this strategy can be attempted in the current context
    fn is_available(&self) -> bool;

    async fn write_text(&self, text: &str) -> PageResult<()>;
}

/// Result of a copy attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CopyOutcome {
    Copied { strategy: String },
    Failed { strategy: String, reason: String },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

const FAILURE_MESSAGE: &str = "Copy failed, please copy it manually.";

/// Copy `content` and tell the user how it went
///
/// `label` names what was copied in the success toast (e.g. "Email").
pub async fn copy_to_clipboard(
    primary: &dyn ClipboardStrategy,
    fallback: &dyn ClipboardStrategy,
    toast: &Toast,
    content: &str,
    label: &str,
) -> CopyOutcome {
    if primary.is_available() {
        match primary.write_text(content).await {
            Ok(()) => return copied(primary, toast, label),
            Err(e) => tracing::warn!(
                "Clipboard strategy '{}' failed, trying '{}': {}",
                primary.name(),
                fallback.name(),
                e
            ),
        }
    } else {
        tracing::debug!(
            "Clipboard strategy '{}' unavailable, using '{}'",
            primary.name(),
            fallback.name()
        );
    }

    match fallback.write_text(content).await {
        Ok(()) => copied(fallback, toast, label),
        Err(e) => {
            tracing::error!("Clipboard strategy '{}' failed: {}", fallback.name(), e);
            notify(toast, FAILURE_MESSAGE, FAILURE_DURATION);
            CopyOutcome::Failed {
                strategy: fallback.name().to_string(),
                reason: e.to_string(),
            }
        }
    }
}

fn copied(strategy: &dyn ClipboardStrategy, toast: &Toast, label: &str) -> CopyOutcome {
    notify(toast, &format!("{} copied!", label), DEFAULT_DURATION);
    CopyOutcome::Copied {
        strategy: strategy.name().to_string(),
    }
}

fn notify(toast: &Toast, message: &str, duration: std::time::Duration) {
    if let Err(e) = toast.show(message, duration) {
        tracing::warn!("Could not report clipboard result: {}", e);
    }
}

/// In-memory clipboard used for headless runs and tests
#[derive(Debug)]
pub struct MemoryClipboard {
    name: String,
    available: bool,
    failing: bool,
    contents: ParkingMutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            failing: false,
            contents: ParkingMutex::new(None),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Make every write fail
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

#[async_trait]
impl ClipboardStrategy for MemoryClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn write_text(&self, text: &str) -> PageResult<()> {
        if !self.available {
            return Err(PageError::ClipboardUnsupported(self.name.clone()));
        }
        if self.failing {
            return Err(PageError::ClipboardWrite(format!(
                "{} rejected the write",
                self.name
            )));
        }
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}
