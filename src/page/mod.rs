//! Page collaborators sharing the document with the trail
//!
//! Toast, clipboard copy, popups and the clock all write to page elements
//! looked up by id. `Document` is that lookup; `MemoryDocument` keeps the
//! elements in memory for tests and headless runs.

pub mod clipboard;
pub mod clock;
pub mod popup;
pub mod toast;

use parking_lot::Mutex as ParkingMutex;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

pub use clipboard::{copy_to_clipboard, ClipboardStrategy, CopyOutcome, MemoryClipboard};
pub use clock::{Clock, ClockDisplay};
pub use popup::{Key, KeyAction, Popup, PopupHost, SearchPopup};
pub use toast::Toast;

/// Errors raised by page collaborators
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Missing page element: {0}")]
    MissingElement(String),

    #[error("Clipboard unsupported: {0}")]
    ClipboardUnsupported(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    #[error("Invalid clock epoch: {0}")]
    InvalidEpoch(#[from] chrono::ParseError),
}

/// Result type for page operations
pub type PageResult<T> = Result<T, PageError>;

/// Element access by id
pub trait Document: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    /// Replace the element's content
    fn set_content(&self, id: &str, content: &str) -> PageResult<()>;

    /// Add or remove a class on the element
    fn set_class(&self, id: &str, class: &str, enabled: bool) -> PageResult<()>;
}

#[derive(Debug, Clone, Default)]
struct Element {
    content: String,
    classes: BTreeSet<String>,
}

/// In-memory document
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: ParkingMutex<HashMap<String, Element>>,
}

impl MemoryDocument {
    /// Create a document containing empty elements with the given ids
    pub fn with_elements<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let elements = ids
            .into_iter()
            .map(|id| (id.to_string(), Element::default()))
            .collect();
        Self {
            elements: ParkingMutex::new(elements),
        }
    }

    pub fn content(&self, id: &str) -> Option<String> {
        self.elements.lock().get(id).map(|e| e.content.clone())
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .lock()
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut Element) -> R) -> PageResult<R> {
        let mut elements = self.elements.lock();
        let element = elements
            .get_mut(id)
            .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
        Ok(f(element))
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.lock().contains_key(id)
    }

    fn set_content(&self, id: &str, content: &str) -> PageResult<()> {
        self.with_element(id, |e| e.content = content.to_string())
    }

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> PageResult<()> {
        self.with_element(id, |e| {
            if enabled {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        })
    }
}
