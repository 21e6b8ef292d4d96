use eframe::egui::Color32;
use egui_plot::MarkerShape;

use crate::data::model::ProductType;

// ---------------------------------------------------------------------------
// Fixed per-category chart styling
// ---------------------------------------------------------------------------

/// Color and marker for one product type. The report uses a fixed
/// colorblind-safe palette so a category always looks the same, whatever
/// subset is selected.
#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    pub color: Color32,
    pub marker: MarkerShape,
}

/// The fixed style for a category.
pub fn style_for(product: ProductType) -> CategoryStyle {
    match product {
        ProductType::PineSawtimber => CategoryStyle {
            color: Color32::from_rgb(0xD5, 0x5E, 0x00),
            marker: MarkerShape::Circle,
        },
        ProductType::MixedHardwoodSawtimber => CategoryStyle {
            color: Color32::from_rgb(0x00, 0x9E, 0x73),
            marker: MarkerShape::Square,
        },
        ProductType::PineChipNSaw => CategoryStyle {
            color: Color32::from_rgb(0xE6, 0x9F, 0x00),
            marker: MarkerShape::Diamond,
        },
        ProductType::PinePulpwood => CategoryStyle {
            color: Color32::from_rgb(0x00, 0x72, 0xB2),
            marker: MarkerShape::Up,
        },
        ProductType::HardwoodPulpwood => CategoryStyle {
            color: Color32::from_rgb(0xCC, 0x79, 0xA7),
            marker: MarkerShape::Down,
        },
    }
}
