//! PDF/QR label generation — sticker sheets for tile boxes and work
//! orders for installers.

pub mod pdf;
pub mod routes;

pub use pdf::{sticker_sheet, work_order};
pub use routes::{LabelRouteState, label_routes};
