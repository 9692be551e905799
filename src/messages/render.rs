//! Render state - data structure sent from App layer to UI for rendering

use crate::app::screens::{CharacterModal, CollectionScreen, ProductDetail};
use crate::messages::network::Fetch;
use crate::messages::ui_events::AppTab;
use crate::models::{Character, Product};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub active_tab: AppTab,

    // Characters tab
    pub characters: CollectionScreen<Character>,
    pub character_modal: CharacterModal,

    // Store tab; `product_detail` is set while the detail screen is shown
    pub products: CollectionScreen<Product>,
    pub product_detail: Option<ProductDetail>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_tab: AppTab::Characters,
            characters: CollectionScreen::new(Fetch::ListCharacters),
            character_modal: CharacterModal::new(),
            products: CollectionScreen::new(Fetch::ListProducts { limit: None }),
            product_detail: None,
            show_help: false,
        }
    }
}
