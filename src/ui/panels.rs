use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::filter::Projection;
use crate::data::model::{PriceKind, Quarter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – report controls
// ---------------------------------------------------------------------------

/// Render the control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Mississippi Timber Price Report");
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No data available.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Price selector ----
            ui.strong("Select Price:");
            let mut price = state.selection.price;
            for kind in PriceKind::ALL {
                ui.radio_value(&mut price, kind, kind.label());
            }
            if price != state.selection.price {
                state.selection.price = price;
                state.reproject();
            }
            ui.separator();

            // ---- Type selector ----
            ui.strong("Select Type(s):");
            for product in state.dataset.present_types() {
                let mut checked = state.selection.types.contains(&product);
                if ui.checkbox(&mut checked, product.label()).changed() {
                    state.toggle_type(product);
                }
            }
            ui.separator();

            // ---- Quarter selector ----
            ui.strong("Select Quarter(s):");
            for quarter in Quarter::ALL {
                let mut checked = state.selection.quarters.contains(&quarter);
                if ui.checkbox(&mut checked, quarter.label()).changed() {
                    state.toggle_quarter(quarter);
                }
            }
            ui.separator();

            // ---- Year range ----
            ui.strong("Select Year Range:");
            if let (Some((observed_lo, observed_hi)), Some((mut lo, mut hi))) =
                (state.dataset.year_span, state.selection.years)
            {
                let changed = ui
                    .add(egui::Slider::new(&mut lo, observed_lo..=observed_hi).text("From"))
                    .changed()
                    | ui.add(egui::Slider::new(&mut hi, observed_lo..=observed_hi).text("To"))
                        .changed();
                if changed {
                    state.set_year_range(lo, hi);
                }
            } else {
                ui.label("No usable years in the data.");
            }
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Clear All").clicked() {
                    state.reset_selection();
                }
                download_button(ui, state);
            });

            ui.separator();
            about_section(ui);
        });
}

/// "Download Data as CSV" – enabled only for a non-empty filtered view.
fn download_button(ui: &mut Ui, state: &mut AppState) {
    let view = match &state.projection {
        Projection::View(view) if !view.is_empty() => view,
        _ => {
            ui.add_enabled(false, egui::Button::new("Download Data as CSV"));
            return;
        }
    };

    if !ui.button("Download Data as CSV").clicked() {
        return;
    }

    let bytes = match export::to_csv_bytes(view) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("CSV export failed: {e}");
            state.status_message = Some(format!("CSV export failed: {e}"));
            return;
        }
    };

    let target = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name("data.csv")
        .save_file();

    if let Some(path) = target {
        match std::fs::write(&path, bytes) {
            Ok(()) => log::info!("wrote {} rows to {}", view.rows.len(), path.display()),
            Err(e) => {
                log::error!("failed to write {}: {e}", path.display());
                state.status_message = Some(format!("Could not save file: {e}"));
            }
        }
    }
}

fn about_section(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("About this report").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(
                "The Mississippi Timber Price Report provides a picture of timber \
                 market activity showing statewide stumpage prices for common forest \
                 products. This report should only be used as a guide to help \
                 individuals monitor timber market trends. The average price should \
                 not be applied as fair market value for a specific timber sale \
                 because many variables influence actual prices each landowner will \
                 receive.",
            );
            ui.add_space(4.0);
            ui.label(
                "Prices are generated from timber sales conducted and reported \
                 across Mississippi by forest product companies, logging \
                 contractors, consulting foresters, landowners, and other natural \
                 resource professionals.",
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload data").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let visible = match &state.projection {
            Projection::View(view) => view.rows.len(),
            Projection::Insufficient => 0,
        };
        ui.label(format!(
            "{} records loaded, {} in view",
            state.dataset.len(),
            visible
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
