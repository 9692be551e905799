//! Command handlers - business logic for processing UI events

use crate::app::screens::ModalPhase;
use crate::app::state::StoreRoute;
use crate::app::screens::ProductDetail;
use crate::app::AppState;
use crate::messages::network::Payload;
use crate::messages::ui_events::AppTab;
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Mounting / tabs
    // ========================

    /// Mount the visible screen; issues its first fetch the first time only
    pub fn mount_active_tab(&mut self) -> Option<NetworkCommand> {
        let id = self.next_request_id;
        let cmd = match self.active_tab {
            AppTab::Characters => self.characters.mount(id),
            AppTab::Store => match &mut self.store_route {
                StoreRoute::Home => self.products.mount(id),
                StoreRoute::Product(detail) => detail.mount(id),
            },
        };
        if cmd.is_some() {
            self.next_id();
        }
        cmd
    }

    pub fn switch_tab(&mut self, tab: AppTab) -> Option<NetworkCommand> {
        self.active_tab = tab;
        self.mount_active_tab()
    }

    // ========================
    // Cursor / scrolling
    // ========================

    pub fn select_next(&mut self) {
        match self.active_tab {
            AppTab::Characters => {
                if self.character_modal.phase() == ModalPhase::Open {
                    self.character_modal.scroll_down();
                } else {
                    self.characters.select_next();
                }
            }
            AppTab::Store => match &mut self.store_route {
                StoreRoute::Home => self.products.select_next(),
                StoreRoute::Product(detail) => detail.scroll_down(),
            },
        }
    }

    pub fn select_prev(&mut self) {
        match self.active_tab {
            AppTab::Characters => {
                if self.character_modal.phase() == ModalPhase::Open {
                    self.character_modal.scroll_up();
                } else {
                    self.characters.select_prev();
                }
            }
            AppTab::Store => match &mut self.store_route {
                StoreRoute::Home => self.products.select_prev(),
                StoreRoute::Product(detail) => detail.scroll_up(),
            },
        }
    }

    // ========================
    // Open / back / retry
    // ========================

    /// Open the record under the cursor
    pub fn open_selected(&mut self) -> Option<NetworkCommand> {
        match self.active_tab {
            AppTab::Characters => {
                if self.character_modal.phase() == ModalPhase::Open {
                    return None;
                }
                let character_id = self.characters.selected_item()?.id;
                let id = self.next_id();
                Some(self.character_modal.open(character_id, id))
            }
            AppTab::Store => {
                if !matches!(self.store_route, StoreRoute::Home) {
                    return None;
                }
                let product_id = self.products.selected_item()?.id;
                self.navigate_to_product(product_id)
            }
        }
    }

    /// Push the product detail screen for `product_id` and mount it
    pub fn navigate_to_product(&mut self, product_id: u64) -> Option<NetworkCommand> {
        tracing::debug!(product_id, "Navigating to product");
        self.store_route = StoreRoute::Product(ProductDetail::new(product_id));
        self.mount_active_tab()
    }

    /// Close the modal or leave the detail screen
    pub fn back(&mut self) -> Option<NetworkCommand> {
        match self.active_tab {
            AppTab::Characters => {
                if self.character_modal.phase() == ModalPhase::Closed {
                    self.character_modal.dismiss_error();
                    None
                } else {
                    self.character_modal.close()
                }
            }
            AppTab::Store => {
                let route = std::mem::replace(&mut self.store_route, StoreRoute::Home);
                match route {
                    StoreRoute::Product(mut detail) => detail.teardown(),
                    StoreRoute::Home => None,
                }
            }
        }
    }

    /// Re-issue the failed fetch of the visible screen
    pub fn retry(&mut self) -> Option<NetworkCommand> {
        let id = self.next_request_id;
        let cmd = match self.active_tab {
            AppTab::Characters => {
                if self.character_modal.detail.error().is_some() {
                    self.character_modal.retry(id)
                } else {
                    self.characters.retry(id)
                }
            }
            AppTab::Store => match &mut self.store_route {
                StoreRoute::Home => self.products.retry(id),
                StoreRoute::Product(detail) => detail.retry(id),
            },
        };
        if cmd.is_some() {
            self.next_id();
        }
        cmd
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    /// Route a network response to the holder that issued it
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let id = response.id();

        match response {
            NetworkResponse::Success { payload, time_ms, .. } => {
                tracing::debug!(id, time_ms, "Applying response");
                let applied = match payload {
                    Payload::Characters(listing) => self.characters.apply(id, Ok(listing)),
                    Payload::Character(character) => self.character_modal.apply(id, Ok(character)),
                    Payload::Products(listing) => self.products.apply(id, Ok(listing)),
                    Payload::Product(product) => match &mut self.store_route {
                        StoreRoute::Product(detail) => detail.apply(id, Ok(product)),
                        StoreRoute::Home => false,
                    },
                };
                if !applied {
                    tracing::warn!(id, "Response arrived for a screen that no longer waits for it");
                }
            }
            NetworkResponse::Failure { error, .. } => {
                let applied = if self.characters.owns(id) {
                    self.characters.apply(id, Err(error))
                } else if self.character_modal.owns(id) {
                    self.character_modal.apply(id, Err(error))
                } else if self.products.owns(id) {
                    self.products.apply(id, Err(error))
                } else {
                    match &mut self.store_route {
                        StoreRoute::Product(detail) if detail.owns(id) => detail.apply(id, Err(error)),
                        _ => false,
                    }
                };
                if !applied {
                    tracing::warn!(id, "Dropping failure for a request nobody waits for");
                }
            }
            NetworkResponse::Cancelled { .. } => {
                tracing::debug!(id, "Request cancelled");
            }
        }
    }
}
