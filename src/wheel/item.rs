//! Wheel items — one wedge / participant each.

use serde::{Deserialize, Serialize};

/// Colors offered by the item editor. New items take the first one.
pub const PALETTE: [&str; 11] = [
    "#4facfe", "#43e97b", "#fccb90", "#f5576c", "#b1f4cf", "#e84393", "#00cec9", "#ff8c00",
    "#6a0dad", "#39ff14", "#ffffff",
];

/// Weight given to freshly added items.
pub const DEFAULT_WEIGHT: f64 = 10.0;

/// Lower bound for weights edited through the step buttons.
pub const MIN_EDIT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique within its profile's list. Blobs without one get a fresh id.
    #[serde(default = "fresh_id")]
    pub id: String,
    pub label: String,
    /// Relative draw weight. Stored as a JSON number, integral in practice.
    pub weight: f64,
    /// `#rrggbb`, cosmetic only. May be empty; the disc then draws it grey.
    #[serde(default)]
    pub color: String,
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Item {
    /// New item with a fresh id, the default weight and the first palette color.
    pub fn new(label: &str) -> Self {
        Self {
            id: fresh_id(),
            label: label.to_string(),
            weight: DEFAULT_WEIGHT,
            color: PALETTE[0].to_string(),
        }
    }

    fn fixed(id: &str, label: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            weight: DEFAULT_WEIGHT,
            color: color.to_string(),
        }
    }
}

/// Items of the built-in `Standard` profile.
pub fn default_items() -> Vec<Item> {
    vec![
        Item::fixed("1", "Max", "#4facfe"),
        Item::fixed("2", "Anna", "#43e97b"),
        Item::fixed("3", "Lukas", "#f5576c"),
    ]
}

pub fn is_palette_color(color: &str) -> bool {
    PALETTE.iter().any(|c| c.eq_ignore_ascii_case(color))
}

/// Sum of all weights.
pub fn total_weight(items: &[Item]) -> f64 {
    items.iter().map(|i| i.weight).sum()
}

/// Draw chance of `item` in percent, or 0 when the list has no weight.
pub fn chance_percent(item: &Item, items: &[Item]) -> f64 {
    let total = total_weight(items);
    if total > 0.0 {
        item.weight / total * 100.0
    } else {
        0.0
    }
}
