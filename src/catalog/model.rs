//! Tile inventory records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier → product-series mapping, used when assigning product codes
/// and printed on labels.
pub const SUPPLIERS: &[(&str, &str)] = &[
    ("Ames", "Agri"),
    ("Ceratec", "Sienna"),
    ("C&S", "Capri"),
    ("Daltile", "Vetro"),
    ("Midgley West", "Milano"),
    ("Olympia", "Orzo"),
    ("Julian", "Roma"),
    ("Sarana", "Sassa"),
];

/// The product series sold for a supplier, if known.
pub fn series_for(supplier: &str) -> Option<&'static str> {
    SUPPLIERS
        .iter()
        .find(|(name, _)| *name == supplier)
        .map(|(_, series)| *series)
}

/// A tile product in the showroom inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: i64,
    pub name: String,
    /// Price per square foot.
    pub price: Decimal,
    pub description: Option<String>,
    pub supplier: String,
    pub sqft_per_box: f64,
    pub style: String,
    /// Display size, e.g. "12x24".
    pub size: String,
    /// Unique in-house product code.
    pub torino_code: String,
    /// Boxes on hand.
    pub quantity: i64,
    pub color_group: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A tile about to be added to the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTile {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub supplier: String,
    pub sqft_per_box: f64,
    pub style: String,
    pub size: String,
    pub torino_code: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_color_group")]
    pub color_group: String,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_color_group() -> String {
    "White".to_string()
}
