//! App state - pure data structure with no I/O logic

use crate::app::screens::{CharacterModal, CollectionScreen, ProductDetail};
use crate::config::Config;
use crate::messages::network::Fetch;
use crate::messages::ui_events::AppTab;
use crate::messages::RenderState;
use crate::models::{Character, Product};

/// Navigation stack of the Store tab
#[derive(Clone, Debug)]
pub enum StoreRoute {
    Home,
    Product(ProductDetail),
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub active_tab: AppTab,

    // Characters tab
    pub characters: CollectionScreen<Character>,
    pub character_modal: CharacterModal,

    // Store tab
    pub products: CollectionScreen<Product>,
    pub store_route: StoreRoute,

    // Popups
    pub show_help: bool,

    pub next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            active_tab: config.start_tab,
            characters: CollectionScreen::new(Fetch::ListCharacters),
            character_modal: CharacterModal::new(),
            products: CollectionScreen::new(Fetch::ListProducts {
                limit: config.product_limit,
            }),
            store_route: StoreRoute::Home,
            show_help: false,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn product_detail(&self) -> Option<&ProductDetail> {
        match &self.store_route {
            StoreRoute::Product(detail) => Some(detail),
            StoreRoute::Home => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            characters: self.characters.clone(),
            character_modal: self.character_modal.clone(),
            products: self.products.clone(),
            product_detail: self.product_detail().cloned(),
            show_help: self.show_help,
        }
    }
}
