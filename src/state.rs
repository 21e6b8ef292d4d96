use std::sync::Arc;

use crate::data::filter::{project, Projection, Selection};
use crate::data::loader::{fetch_dataset, DatasetCache};
use crate::data::model::{Dataset, ProductType, Quarter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Per-session load-once holder for the remote table.
    cache: DatasetCache,

    /// The loaded table (empty when the fetch failed).
    pub dataset: Arc<Dataset>,

    /// Current user choices.
    pub selection: Selection,

    /// Cached pipeline output for the current (dataset, selection).
    pub projection: Projection,

    /// Error banner shown in the top bar, if any.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = AppState {
            cache: DatasetCache::default(),
            dataset: Arc::new(Dataset::default()),
            selection: Selection::defaults(&Dataset::default()),
            projection: Projection::Insufficient,
            status_message: None,
        };
        state.load();
        state
    }
}

impl AppState {
    /// Fetch the dataset through the session cache. A failed load leaves an
    /// empty table and a banner; the rest of the UI still renders.
    pub fn load(&mut self) {
        match self.cache.get_or_load(fetch_dataset) {
            Ok(dataset) => {
                log::info!("loaded {} stumpage records", dataset.len());
                self.dataset = dataset;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load stumpage data: {e}");
                self.dataset = Arc::new(Dataset::default());
                self.status_message = Some(format!(
                    "Could not download stumpage data ({e}). \
                     Check that the repository is public or that GITHUB_TOKEN is set."
                ));
            }
        }
        // The observed year span may have changed; start from clean defaults.
        self.selection = Selection::defaults(&self.dataset);
        self.reproject();
    }

    /// Drop the cached table and fetch again.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.load();
    }

    /// Recompute the pipeline output after a control change.
    pub fn reproject(&mut self) {
        self.projection = project(&self.dataset, &self.selection);
    }

    /// "Clear All": one atomic assignment back to session defaults, derived
    /// from the same dataset snapshot the controls are bound to.
    pub fn reset_selection(&mut self) {
        self.selection = Selection::defaults(&self.dataset);
        self.reproject();
    }

    pub fn toggle_type(&mut self, product: ProductType) {
        if !self.selection.types.remove(&product) {
            self.selection.types.insert(product);
        }
        self.reproject();
    }

    pub fn toggle_quarter(&mut self, quarter: Quarter) {
        if !self.selection.quarters.remove(&quarter) {
            self.selection.quarters.insert(quarter);
        }
        self.reproject();
    }

    /// Clamp and store a new year range, keeping min ≤ max.
    pub fn set_year_range(&mut self, mut lo: i32, mut hi: i32) {
        if let Some((observed_lo, observed_hi)) = self.dataset.year_span {
            lo = lo.clamp(observed_lo, observed_hi);
            hi = hi.clamp(observed_lo, observed_hi);
        }
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        self.selection.years = Some((lo, hi));
        self.reproject();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_dataset;
    use crate::data::model::PriceKind;

    fn state_with(text: &str) -> AppState {
        let dataset = Arc::new(parse_dataset(text).unwrap());
        let selection = Selection::defaults(&dataset);
        let mut state = AppState {
            cache: DatasetCache::default(),
            dataset,
            selection,
            projection: Projection::Insufficient,
            status_message: None,
        };
        state.reproject();
        state
    }

    const SAMPLE: &str = "\
Type,Time,Year,Quarter,Minimum,Average,Maximum
Pine Sawtimber,2018-Q1,2018,Q1,20.0,25.5,31.0
Pine Pulpwood,2022-Q3,2022,Q3,5.0,7.75,9.5
";

    #[test]
    fn reset_restores_fresh_session_defaults() {
        let mut state = state_with(SAMPLE);
        let fresh = Selection::defaults(&state.dataset);

        state.selection.price = PriceKind::Maximum;
        state.toggle_type(ProductType::PineSawtimber);
        state.toggle_quarter(Quarter::Q1);
        state.set_year_range(2018, 2018);
        assert_ne!(state.selection, fresh);

        state.reset_selection();
        assert_eq!(state.selection, fresh);
        assert_eq!(state.projection, Projection::Insufficient);
    }

    #[test]
    fn toggling_twice_is_a_no_op() {
        let mut state = state_with(SAMPLE);
        state.toggle_type(ProductType::PinePulpwood);
        state.toggle_type(ProductType::PinePulpwood);
        assert!(state.selection.types.is_empty());
    }

    #[test]
    fn year_range_is_clamped_to_the_observed_span_and_reordered() {
        let mut state = state_with(SAMPLE);
        state.set_year_range(2030, 1990);
        assert_eq!(state.selection.years, Some((2018, 2022)));
    }

    #[test]
    fn selection_changes_refresh_the_projection() {
        let mut state = state_with(SAMPLE);
        assert_eq!(state.projection, Projection::Insufficient);

        state.toggle_type(ProductType::PineSawtimber);
        state.toggle_quarter(Quarter::Q1);
        match &state.projection {
            Projection::View(view) => assert_eq!(view.rows.len(), 1),
            Projection::Insufficient => panic!("expected a view"),
        }
    }
}
