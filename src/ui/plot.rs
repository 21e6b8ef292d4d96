use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{uniform_grid_spacer, GridInput, GridMark, Line, Plot, PlotPoints, Points};

use crate::color::style_for;
use crate::data::filter::{FilteredView, Projection};
use crate::state::AppState;

/// Y gridline step, in $/ton.
const PRICE_GRID_STEP: f64 = 5.0;

/// Only every 4th period gets an x-axis label.
const TICK_STRIDE: usize = 4;

// ---------------------------------------------------------------------------
// Price chart (central panel)
// ---------------------------------------------------------------------------

/// Render the stumpage price chart, or the instructional message when the
/// selection is insufficient or matches nothing.
pub fn price_chart(ui: &mut Ui, state: &AppState) {
    let view = match &state.projection {
        Projection::View(view) if !view.is_empty() => view,
        // The original report shows one combined message for both the
        // insufficient-selection and the valid-but-empty case.
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(
                    RichText::new(
                        "No types, years, or quarters selected, or no data available. \
                         Please select at least one type, one year range, and one quarter \
                         to display the plot.",
                    )
                    .color(Color32::RED),
                );
            });
            return;
        }
    };

    let labels: Vec<String> = view.time_axis.iter().map(|p| p.to_string()).collect();
    let hover_labels = labels.clone();
    let tick_labels = labels.clone();
    let n_periods = labels.len();

    let plot = Plot::new("price_chart")
        .y_axis_label("Price ($/ton)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .x_grid_spacer(move |input: GridInput| period_grid_marks(input, n_periods))
        .x_axis_formatter(move |mark: GridMark, _range| {
            // Marks with the wide step size carry the thinned labels.
            if mark.step_size < TICK_STRIDE as f64 {
                return String::new();
            }
            index_label(&tick_labels, mark.value).unwrap_or_default()
        })
        .y_grid_spacer(uniform_grid_spacer(|_| {
            [PRICE_GRID_STEP, PRICE_GRID_STEP * 5.0, PRICE_GRID_STEP * 20.0]
        }))
        .label_formatter(move |name, point| {
            let time = index_label(&hover_labels, point.x).unwrap_or_default();
            if name.is_empty() {
                format!("Time: {time}\nPrice ($/ton): {:.2}", point.y)
            } else {
                format!("Type: {name}\nTime: {time}\nPrice ($/ton): {:.2}", point.y)
            }
        });

    plot.show(ui, |plot_ui| {
        for group in &view.groups {
            let style = style_for(group.product);

            // X is the position of the point's period on the shared axis.
            let coords: Vec<[f64; 2]> = group
                .points
                .iter()
                .filter_map(|p| {
                    let idx = view.time_axis.binary_search(&p.period).ok()?;
                    Some([idx as f64, p.value])
                })
                .collect();

            let line_points: PlotPoints = coords.clone().into();
            plot_ui.line(
                Line::new(line_points)
                    .name(group.product.label())
                    .color(style.color)
                    .width(2.0),
            );

            let marker_points: PlotPoints = coords.into();
            plot_ui.points(
                Points::new(marker_points)
                    .name(group.product.label())
                    .color(style.color)
                    .shape(style.marker)
                    .radius(4.5),
            );
        }
    });

    legend_row(ui, view);
}

/// Horizontal legend, centered below the plot, in fixed category order.
fn legend_row(ui: &mut Ui, view: &FilteredView) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            // Rough centering: pad by half the unused width.
            let entry_width = 190.0;
            let used = entry_width * view.groups.len() as f32;
            let pad = ((ui.available_width() - used) / 2.0).max(0.0);
            ui.add_space(pad);

            for group in &view.groups {
                let style = style_for(group.product);
                ui.label(RichText::new("●").color(style.color));
                ui.label(group.product.label());
                ui.add_space(12.0);
            }
        });
    });
}

/// Grid marks at every period index; every `TICK_STRIDE`-th gets the wide
/// step size so the formatter can pick it out for labelling.
fn period_grid_marks(input: GridInput, n_periods: usize) -> Vec<GridMark> {
    let (lo, hi) = input.bounds;
    let first = lo.floor().max(0.0) as i64;
    let last = hi.ceil() as i64;

    (first..=last)
        .filter(|i| (*i as usize) < n_periods)
        .map(|i| GridMark {
            value: i as f64,
            step_size: if i % TICK_STRIDE as i64 == 0 {
                TICK_STRIDE as f64
            } else {
                1.0
            },
        })
        .collect()
}

/// The axis label for a fractional plot coordinate, if it lands on a period.
fn index_label(labels: &[String], x: f64) -> Option<String> {
    let idx = x.round();
    if (x - idx).abs() > 0.25 || idx < 0.0 {
        return None;
    }
    labels.get(idx as usize).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fourth_mark_is_wide() {
        let input = GridInput {
            bounds: (0.0, 10.0),
            base_step_size: 1.0,
        };
        let marks = period_grid_marks(input, 11);
        assert_eq!(marks.len(), 11);
        for mark in &marks {
            let idx = mark.value as i64;
            if idx % 4 == 0 {
                assert_eq!(mark.step_size, 4.0);
            } else {
                assert_eq!(mark.step_size, 1.0);
            }
        }
    }

    #[test]
    fn marks_never_extend_past_the_axis() {
        let input = GridInput {
            bounds: (-3.0, 50.0),
            base_step_size: 1.0,
        };
        let marks = period_grid_marks(input, 6);
        assert!(marks.iter().all(|m| m.value >= 0.0 && m.value < 6.0));
    }

    #[test]
    fn labels_resolve_only_near_integer_coordinates() {
        let labels = vec!["2020-Q1".to_string(), "2020-Q2".to_string()];
        assert_eq!(index_label(&labels, 1.1), Some("2020-Q2".to_string()));
        assert_eq!(index_label(&labels, 0.5), None);
        assert_eq!(index_label(&labels, -1.0), None);
        assert_eq!(index_label(&labels, 5.0), None);
    }
}
