//! PDF assembly for sticker sheets and work orders.
//!
//! Single US-letter page built from raw content operations. QR codes are
//! drawn as filled rectangles straight from the module matrix, so no
//! raster images need embedding.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use qrcode::{Color, QrCode};

use crate::catalog::model::{Tile, series_for};
use crate::error::LabelError;
use crate::projects::model::Project;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

/// A sheet of identical tile labels: 3 columns by 4 rows, each with the
/// product QR, name, price/size line, and product code.
pub fn sticker_sheet(tile: &Tile) -> Result<Vec<u8>, LabelError> {
    const COLS: usize = 3;
    const ROWS: usize = 4;
    const LABEL_WIDTH: f32 = 192.0;
    const LABEL_HEIGHT: f32 = 180.0;
    const QR_SIZE: f32 = 72.0;

    let name: String = tile.name.chars().take(30).collect();
    let detail = format!("${:.2}/sq ft | {}", tile.price, tile.size);
    let code_line = match series_for(&tile.supplier) {
        Some(series) => format!("{} | {series}", tile.torino_code),
        None => tile.torino_code.clone(),
    };

    let mut ops = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            let x = 18.0 + col as f32 * LABEL_WIDTH + 6.0;
            let y_top = PAGE_HEIGHT - 36.0 - row as f32 * LABEL_HEIGHT;

            qr_ops(&mut ops, &tile.torino_code, x, y_top, QR_SIZE)?;
            text_ops(&mut ops, "F2", 10, x, y_top - QR_SIZE - 14.0, &name);
            text_ops(&mut ops, "F1", 8, x, y_top - QR_SIZE - 26.0, &detail);
            text_ops(&mut ops, "F1", 8, x, y_top - QR_SIZE - 36.0, &code_line);
        }
    }
    single_page(ops)
}

/// A work order for one installation project, with a QR the installer
/// scans to open the finish-job page.
pub fn work_order(project: &Project, tile: &Tile) -> Result<Vec<u8>, LabelError> {
    let mut ops = Vec::new();

    text_ops(&mut ops, "F2", 16, 72.0, 720.0, "Work Order");
    qr_ops(&mut ops, &format!("finish/{}", project.id), 432.0, 756.0, 72.0)?;

    let mut lines = vec![
        format!("Tile: {}", tile.name),
        format!("Size: {}", tile.size),
        format!("Code: {}", tile.torino_code),
    ];
    if let Some(sq_ft) = project.sq_ft {
        lines.push(format!("Sq Ft: {sq_ft}"));
    }
    if let Some(address) = &project.address {
        lines.push(format!("Address: {address}"));
    }
    if let Some(client) = &project.client_name {
        lines.push(format!("Client: {client}"));
    }
    if let Some(date) = &project.install_date {
        lines.push(format!("Date: {date}"));
    }
    if let Some(fee) = project.installer_fee {
        lines.push(format!("Installer Fee: ${fee:.2}"));
    }
    if let Some(budget) = project.budget {
        lines.push(format!("Budget: ${budget:.2}"));
    }
    if let Some(schedule) = &project.schedule {
        let short: String = schedule.chars().take(50).collect();
        lines.push(format!("Schedule: {short}"));
    }

    let mut y = 680.0;
    for line in &lines {
        text_ops(&mut ops, "F1", 12, 72.0, y, line);
        y -= 16.0;
    }

    single_page(ops)
}

fn text_ops(ops: &mut Vec<Operation>, font: &str, size: i64, x: f32, y: f32, content: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(content)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Emit one QR code with its top-left corner at (x, y_top).
fn qr_ops(
    ops: &mut Vec<Operation>,
    data: &str,
    x: f32,
    y_top: f32,
    size: f32,
) -> Result<(), LabelError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| LabelError::Qr(e.to_string()))?;
    let width = code.width();
    let module = size / width as f32;

    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let col = (i % width) as f32;
            let row = (i / width) as f32;
            ops.push(Operation::new(
                "re",
                vec![
                    (x + col * module).into(),
                    (y_top - (row + 1.0) * module).into(),
                    module.into(),
                    module.into(),
                ],
            ));
        }
    }
    ops.push(Operation::new("f", vec![]));
    Ok(())
}

/// Wrap content operations into a one-page document.
fn single_page(ops: Vec<Operation>) -> Result<Vec<u8>, LabelError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
            "F2" => bold_id,
        },
    });

    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| LabelError::Render(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| LabelError::Render(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::projects::model::ProjectStatus;

    use super::*;

    fn sample_tile() -> Tile {
        Tile {
            id: 1,
            name: "Calacatta Gloss".to_string(),
            price: dec!(4.25),
            description: None,
            supplier: "Daltile".to_string(),
            sqft_per_box: 10.5,
            style: "Marble Look".to_string(),
            size: "12x24".to_string(),
            torino_code: "VET-1201".to_string(),
            quantity: 12,
            color_group: "White".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn sample_project() -> Project {
        Project {
            id: 7,
            torino_code: "VET-1201".to_string(),
            client_id: Some(1),
            client_name: Some("John Smith".to_string()),
            address: Some("123 Main St".to_string()),
            sq_ft: Some(240.0),
            install_date: Some("2026-09-01".to_string()),
            installer_fee: Some(dec!(850.00)),
            budget: None,
            schedule: None,
            status: ProjectStatus::Scheduled,
            photo_url: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn sticker_sheet_is_a_pdf_with_the_code() {
        let bytes = sticker_sheet(&sample_tile()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, "VET-1201"));
        assert!(contains(&bytes, "Calacatta Gloss"));
        // Daltile maps to the Vetro series on the code line.
        assert!(contains(&bytes, "Vetro"));
    }

    #[test]
    fn work_order_carries_detail_lines_and_finish_qr() {
        let bytes = work_order(&sample_project(), &sample_tile()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, "Work Order"));
        assert!(contains(&bytes, "123 Main St"));
        assert!(contains(&bytes, "Installer Fee: $850.00"));
        // Budget was None; no budget line.
        assert!(!contains(&bytes, "Budget:"));
    }

    #[test]
    fn long_names_are_truncated_on_labels() {
        let mut tile = sample_tile();
        tile.name = "An Exceptionally Long Tile Product Name That Overflows".to_string();
        let bytes = sticker_sheet(&tile).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(!contains(&bytes, "Overflows"));
    }
}
