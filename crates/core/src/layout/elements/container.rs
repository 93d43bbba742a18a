//! Container types: LTFigure and LTPage.

use serde::{Deserialize, Serialize};

use crate::utils::Rect;

use super::component::LTComponent;
use super::item::LTItem;

/// A group of nested items, typically a Form XObject.
///
/// Images drawn inside a form show up here as children even when the
/// upstream interpreter also emits them at page level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTFigure {
    #[serde(rename = "bbox")]
    component: LTComponent,
    pub name: String,
    #[serde(default)]
    items: Vec<LTItem>,
}

impl LTFigure {
    pub fn new(name: &str, bbox: Rect) -> Self {
        Self {
            component: LTComponent::new(bbox),
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, item: LTItem) {
        self.items.push(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LTItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::ops::Deref for LTFigure {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}

/// Root layout node for a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LTPage {
    #[serde(rename = "bbox")]
    component: LTComponent,
    pub pageid: i32,
    #[serde(default)]
    pub rotate: f64,
    #[serde(default)]
    items: Vec<LTItem>,
}

impl LTPage {
    pub fn new(pageid: i32, bbox: Rect, rotate: f64) -> Self {
        Self {
            component: LTComponent::new(bbox),
            pageid,
            rotate,
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, item: LTItem) {
        self.items.push(item);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LTItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::ops::Deref for LTPage {
    type Target = LTComponent;
    fn deref(&self) -> &Self::Target {
        &self.component
    }
}
