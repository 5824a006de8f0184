//! Asset provider (wasm only)
//!
//! Loads the fixed sprite set and acts as the start-up barrier: the game
//! loop must not begin until every image has decoded. A failed load aborts
//! startup and names the missing asset; there is no partial-asset mode.

use std::fmt;

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::render::SpriteId;

/// An asset failed to load or decode
#[derive(Debug, Clone)]
pub struct AssetError {
    pub name: &'static str,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load asset '{}'", self.name)
    }
}

impl std::error::Error for AssetError {}

/// The loaded sprite set, indexed by [`SpriteId`]
pub struct Assets {
    images: Vec<HtmlImageElement>,
}

impl Assets {
    pub fn get(&self, id: SpriteId) -> &HtmlImageElement {
        &self.images[id.index()]
    }
}

/// Load and decode every sprite, completing only once all are ready
pub async fn load_all() -> Result<Assets, AssetError> {
    let mut images = Vec::with_capacity(SpriteId::ALL.len());
    for id in SpriteId::ALL {
        let name = id.name();
        let img = HtmlImageElement::new().map_err(|_| AssetError { name })?;
        img.set_src(&format!("assets/{name}.png"));
        JsFuture::from(img.decode())
            .await
            .map_err(|_| AssetError { name })?;
        images.push(img);
    }
    log::info!("loaded {} assets", images.len());
    Ok(Assets { images })
}
