use derive_more::{AsRef, Deref, Display, From, Into};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// One entry on the ring. Its position in the item list fixes its angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub asset: PathBuf,
}

impl Item {
    pub fn new(id: ItemId, asset: impl Into<PathBuf>) -> Self {
        Self {
            id,
            asset: asset.into(),
        }
    }
}

/// Loaded images for the glyph and the ring items. Anything that failed to
/// load is simply absent and gets skipped when drawing.
#[derive(Debug, Clone)]
pub struct Assets<I> {
    glyph: Option<I>,
    items: HashMap<ItemId, I>,
}

impl<I> Default for Assets<I> {
    fn default() -> Self {
        Self {
            glyph: None,
            items: HashMap::new(),
        }
    }
}

impl<I> Assets<I> {
    pub fn load<F, E>(glyph: Option<&Path>, items: &[Item], mut loader: F) -> Self
    where
        F: FnMut(&Path) -> Result<I, E>,
        E: fmt::Display,
    {
        let mut load = |path: &Path| match loader(path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Skipping image {}: {}", path.display(), e);
                None
            }
        };

        let glyph = glyph.and_then(&mut load);
        let items: HashMap<_, _> = items
            .iter()
            .filter_map(|item| load(&item.asset).map(|image| (item.id.clone(), image)))
            .collect();

        log::debug!("Loaded {} item images", items.len());
        Self { glyph, items }
    }

    pub fn glyph(&self) -> Option<&I> {
        self.glyph.as_ref()
    }

    pub fn item(&self, id: &ItemId) -> Option<&I> {
        self.items.get(id)
    }
}
