//! Modal popup container and the search popup built on it
//!
//! Only one popup is open at a time. Opening a popup replaces the previous
//! one together with its key binding.

use crate::page::{Document, PageResult};
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_CONTAINER_ID: &str = "popup-container";
/// Content is cleared after the close transition finishes
pub const CLOSE_TRANSITION: Duration = Duration::from_millis(300);
const SHOW_CLASS: &str = "show";

pub const SEARCH_TITLE: &str = "Bing Search";
pub const SEARCH_ENDPOINT: &str = "https://www.bing.com/search?q=";
const SEARCH_BODY: &str = r#"<div class="search-popup-content">
    <input type="text" id="search-input" placeholder="Enter a search..." autofocus>
    <button id="search-button">Search</button>
</div>"#;

/// Keys a popup can react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(String),
}

/// What a key press asks the popup to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Close,
}

pub type KeyBinding = Box<dyn Fn(&Key) -> Option<KeyAction> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    /// Inner HTML of the popup body
    pub body: String,
    /// Extra class on the popup card
    pub class: String,
}

impl Popup {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            class: String::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Card markup placed inside the container
    pub fn render(&self) -> String {
        format!(
            concat!(
                "<div class=\"popup-card {}\">\n",
                "    <button class=\"close-button\"></button>\n",
                "    <h2>{}</h2>\n",
                "    <div>{}</div>\n",
                "</div>"
            ),
            self.class, self.title, self.body
        )
    }
}

#[derive(Default)]
struct PopupState {
    current: Option<Popup>,
    key_binding: Option<KeyBinding>,
    pending_clear: Option<JoinHandle<()>>,
}

/// The page's popup container
pub struct PopupHost {
    document: Arc<dyn Document>,
    container_id: String,
    state: ParkingMutex<PopupState>,
}

impl PopupHost {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self::with_container(document, DEFAULT_CONTAINER_ID)
    }

    pub fn with_container(document: Arc<dyn Document>, container_id: impl Into<String>) -> Self {
        Self {
            document,
            container_id: container_id.into(),
            state: ParkingMutex::new(PopupState::default()),
        }
    }

    /// Replace whatever is open with `popup`
    pub fn open(&self, popup: Popup, key_binding: Option<KeyBinding>) -> PageResult<()> {
        let mut state = self.state.lock();
        if let Some(clear) = state.pending_clear.take() {
            clear.abort();
        }
        state.key_binding = None;

        self.document.set_content(&self.container_id, &popup.render())?;
        self.document.set_class(&self.container_id, SHOW_CLASS, true)?;

        tracing::debug!("Opened popup '{}'", popup.title);
        state.current = Some(popup);
        state.key_binding = key_binding;
        Ok(())
    }

    /// Hide the container and clear it once the transition is over
    ///
    /// Must be called from within a tokio runtime.
    pub fn close(&self) -> PageResult<()> {
        let mut state = self.state.lock();
        state.key_binding = None;
        state.current = None;

        self.document.set_class(&self.container_id, SHOW_CLASS, false)?;

        if let Some(clear) = state.pending_clear.take() {
            clear.abort();
        }
        let document = self.document.clone();
        let container_id = self.container_id.clone();
        state.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(CLOSE_TRANSITION).await;
            if let Err(e) = document.set_content(&container_id, "") {
                tracing::warn!("Failed to clear popup container: {}", e);
            }
        }));
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().current.is_some()
    }

    pub fn current(&self) -> Option<Popup> {
        self.state.lock().current.clone()
    }

    /// Look up the open popup's binding for `key`
    pub fn handle_key(&self, key: &Key) -> Option<KeyAction> {
        let state = self.state.lock();
        state.key_binding.as_ref().and_then(|binding| binding(key))
    }
}

impl Drop for PopupHost {
    fn drop(&mut self) {
        if let Some(clear) = self.state.lock().pending_clear.take() {
            clear.abort();
        }
    }
}

/// Build the search URL for a query, or `None` when it is blank
pub fn search_url(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(format!("{}{}", SEARCH_ENDPOINT, urlencoding::encode(query)))
}

fn search_keys(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Enter => Some(KeyAction::Submit),
        Key::Escape => Some(KeyAction::Close),
        Key::Other(_) => None,
    }
}

/// Popup with a single search box
pub struct SearchPopup {
    host: Arc<PopupHost>,
}

impl SearchPopup {
    pub fn new(host: Arc<PopupHost>) -> Self {
        Self { host }
    }

    pub fn open(&self) -> PageResult<()> {
        self.host
            .open(Popup::new(SEARCH_TITLE, SEARCH_BODY), Some(Box::new(search_keys)))
    }

    /// Submit the query; returns the URL to open in a new tab
    ///
    /// A blank query leaves the popup open and returns `None`.
    pub fn submit(&self, query: &str) -> PageResult<Option<String>> {
        let Some(url) = search_url(query) else {
            return Ok(None);
        };

        tracing::info!("Searching: {}", url);
        self.host.close()?;
        Ok(Some(url))
    }

    /// React to a key press while `input` holds the search box text
    pub fn handle_key(&self, key: &Key, input: &str) -> PageResult<Option<String>> {
        match self.host.handle_key(key) {
            Some(KeyAction::Submit) => self.submit(input),
            Some(KeyAction::Close) => {
                self.host.close()?;
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
