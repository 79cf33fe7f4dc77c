//! Tile inventory — model and REST routes.

pub mod model;
pub mod routes;

pub use model::{NewTile, SUPPLIERS, Tile, series_for};
pub use routes::{CatalogRouteState, catalog_routes};
