//! Per-screen view state.
//!
//! Each holder owns the data one screen shows and the id of the fetch it is
//! waiting for. A response whose id is not the pending one belongs to a
//! superseded or torn-down request and is dropped.

use crate::error::FetchError;
use crate::messages::network::Fetch;
use crate::messages::NetworkCommand;
use crate::models::{Character, Listing, Product, Record};

/// Result of a remote read as the presentation layer sees it
#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
    /// Nothing requested yet
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Idle
    }
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Remote::Idle)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Remote::Failed(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Collection screen
// ============================================================================

/// A list of records with a cursor, loaded once on mount
#[derive(Clone, Debug)]
pub struct CollectionScreen<R> {
    pub items: Remote<Vec<R>>,
    /// Total on the server, when the source reports it
    pub total: Option<u64>,
    pub selected: usize,
    fetch: Fetch,
    pending: Option<u64>,
}

impl<R: Record> CollectionScreen<R> {
    pub fn new(fetch: Fetch) -> Self {
        CollectionScreen {
            items: Remote::Idle,
            total: None,
            selected: 0,
            fetch,
            pending: None,
        }
    }

    pub fn owns(&self, request_id: u64) -> bool {
        self.pending == Some(request_id)
    }

    /// Issue the single list fetch of this screen. No-op once mounted.
    pub fn mount(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if !self.items.is_idle() {
            return None;
        }
        Some(self.start(request_id))
    }

    /// Re-issue the list fetch after a failure
    pub fn retry(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if self.items.error().is_none() {
            return None;
        }
        Some(self.start(request_id))
    }

    fn start(&mut self, request_id: u64) -> NetworkCommand {
        self.items = Remote::Loading;
        self.pending = Some(request_id);
        tracing::debug!(request_id, collection = R::COLLECTION, "Collection loading");
        NetworkCommand::Execute {
            id: request_id,
            fetch: self.fetch.clone(),
        }
    }

    /// Commit a list response. Returns false if it was stale.
    pub fn apply(&mut self, request_id: u64, result: Result<Listing<R>, FetchError>) -> bool {
        if !self.owns(request_id) {
            tracing::warn!(request_id, collection = R::COLLECTION, "Discarding stale list response");
            return false;
        }
        self.pending = None;

        match result {
            Ok(listing) => {
                self.selected = 0;
                self.total = listing.total;
                self.items = Remote::Ready(listing.items);
            }
            Err(e) => {
                tracing::warn!(request_id, collection = R::COLLECTION, error = %e, "List fetch failed");
                self.items = Remote::Failed(e);
            }
        }
        true
    }

    pub fn select_next(&mut self) {
        if let Some(items) = self.items.ready() {
            if !items.is_empty() {
                self.selected = (self.selected + 1) % items.len();
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(items) = self.items.ready() {
            if !items.is_empty() {
                self.selected = self.selected.checked_sub(1).unwrap_or(items.len() - 1);
            }
        }
    }

    pub fn selected_item(&self) -> Option<&R> {
        self.items.ready().and_then(|items| items.get(self.selected))
    }
}

// ============================================================================
// Product detail screen
// ============================================================================

/// Detail screen reached by navigating with `{ id }`
#[derive(Clone, Debug)]
pub struct ProductDetail {
    pub product_id: u64,
    pub item: Remote<Product>,
    pub scroll: u16,
    pending: Option<u64>,
}

impl ProductDetail {
    pub fn new(product_id: u64) -> Self {
        ProductDetail {
            product_id,
            item: Remote::Idle,
            scroll: 0,
            pending: None,
        }
    }

    pub fn owns(&self, request_id: u64) -> bool {
        self.pending == Some(request_id)
    }

    pub fn mount(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if !self.item.is_idle() {
            return None;
        }
        Some(self.start(request_id))
    }

    pub fn retry(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if self.item.error().is_none() {
            return None;
        }
        Some(self.start(request_id))
    }

    fn start(&mut self, request_id: u64) -> NetworkCommand {
        self.item = Remote::Loading;
        self.pending = Some(request_id);
        NetworkCommand::Execute {
            id: request_id,
            fetch: Fetch::Product(self.product_id),
        }
    }

    pub fn apply(&mut self, request_id: u64, result: Result<Product, FetchError>) -> bool {
        if !self.owns(request_id) {
            tracing::warn!(request_id, product_id = self.product_id, "Discarding stale product response");
            return false;
        }
        self.pending = None;
        self.item = match result {
            Ok(product) => Remote::Ready(product),
            Err(e) => {
                tracing::warn!(request_id, product_id = self.product_id, error = %e, "Product fetch failed");
                Remote::Failed(e)
            }
        };
        true
    }

    /// Leave the screen; cancels the fetch still in flight, if any
    pub fn teardown(&mut self) -> Option<NetworkCommand> {
        self.pending.take().map(NetworkCommand::Cancel)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

// ============================================================================
// Character detail modal
// ============================================================================

/// Observable phase of the character modal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Loading,
    Open,
}

/// Modal overlay showing one character on top of the list
#[derive(Clone, Debug, Default)]
pub struct CharacterModal {
    pub detail: Remote<Character>,
    pub visible: bool,
    pub scroll: u16,
    /// Character id of the last open request, kept for retry
    requested: Option<u64>,
    pending: Option<u64>,
}

impl CharacterModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, request_id: u64) -> bool {
        self.pending == Some(request_id)
    }

    pub fn phase(&self) -> ModalPhase {
        if self.detail.is_loading() {
            ModalPhase::Loading
        } else if self.visible {
            ModalPhase::Open
        } else {
            ModalPhase::Closed
        }
    }

    /// Last successfully loaded character; survives `close`
    pub fn selected(&self) -> Option<&Character> {
        self.detail.ready()
    }

    /// Start loading `character_id`. Supersedes any load still pending.
    pub fn open(&mut self, character_id: u64, request_id: u64) -> NetworkCommand {
        if let Some(old) = self.pending {
            tracing::debug!(old, request_id, "Superseding pending character load");
        }
        self.detail = Remote::Loading;
        self.visible = false;
        self.scroll = 0;
        self.requested = Some(character_id);
        self.pending = Some(request_id);
        NetworkCommand::Execute {
            id: request_id,
            fetch: Fetch::Character(character_id),
        }
    }

    pub fn retry(&mut self, request_id: u64) -> Option<NetworkCommand> {
        if self.detail.error().is_none() {
            return None;
        }
        let character_id = self.requested?;
        Some(self.open(character_id, request_id))
    }

    /// Commit a detail response. The record is stored before the modal is
    /// made visible; a failure leaves the modal closed.
    pub fn apply(&mut self, request_id: u64, result: Result<Character, FetchError>) -> bool {
        if !self.owns(request_id) {
            tracing::warn!(request_id, "Discarding stale character response");
            return false;
        }
        self.pending = None;

        match result {
            Ok(character) => {
                self.detail = Remote::Ready(character);
                self.visible = true;
            }
            Err(e) => {
                tracing::warn!(request_id, error = %e, "Character fetch failed");
                self.detail = Remote::Failed(e);
                self.visible = false;
            }
        }
        true
    }

    /// Hide the modal. A load still in flight is abandoned and cancelled.
    pub fn close(&mut self) -> Option<NetworkCommand> {
        self.visible = false;
        if !self.detail.is_loading() {
            return None;
        }
        self.detail = Remote::Idle;
        self.pending.take().map(NetworkCommand::Cancel)
    }

    /// Forget a reported failure
    pub fn dismiss_error(&mut self) {
        if self.detail.error().is_some() {
            self.detail = Remote::Idle;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
