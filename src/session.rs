use crate::cache::{Prepared, PreparedCache};
use crate::debounce::Debouncer;
use crate::filter::{FilterState, YearFilter, run_filter_pass};
use crate::model::{FilterValue, NameDimension, Record};
use crate::normalize::Catalog;
use crate::options::FilterOptions;
use crate::pagination::{Page, PageSync, PaginationState};
use crate::query_state::{self, Bookmark};
use crate::year_range::{YearRange, YearSlider};
use std::sync::Arc;
use std::time::Instant;

/// One user's view of a catalog: committed filter and page state,
/// pending debounced input and the current ordered result.
#[derive(Debug)]
pub struct BrowseSession {
    catalog: Catalog,
    prepared: Arc<Prepared>,
    pub state: FilterState,
    pub pagination: PaginationState,
    query_input: Debouncer<String>,
    year_input: Debouncer<YearRange>,
    results: Vec<usize>,
    pub dirty: bool,
    pub status: String,
}

impl BrowseSession {
    pub fn new(catalog: Catalog, cache: &mut PreparedCache) -> Self {
        let prepared = cache.get_or_prepare(&catalog);
        let config = cache.config();
        let mut session = Self {
            state: FilterState::new(&prepared.options),
            pagination: PaginationState::new(config.items_per_page),
            query_input: Debouncer::new(config.debounce()),
            year_input: Debouncer::new(config.debounce()),
            catalog,
            prepared,
            results: Vec::new(),
            dirty: true,
            status: String::from("Ready"),
        };
        session.run_pass(PageSync::Clamp);
        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &FilterOptions {
        &self.prepared.options
    }

    pub fn year_count(&self) -> usize {
        self.prepared.options.year_values().len()
    }

    pub fn replace_catalog(&mut self, catalog: Catalog, cache: &mut PreparedCache) {
        let old_count = self.year_count();
        let was_full =
            matches!(&self.state.year, YearFilter::Range(range) if range.is_full(old_count));
        self.prepared = cache.get_or_prepare(&catalog);
        self.catalog = catalog;

        let new_count = self.year_count();
        if was_full {
            self.state.year = YearFilter::Range(YearRange::full(new_count));
        } else {
            self.state.clamp_year_range(new_count);
        }
        self.year_input.flush();
        self.run_pass(PageSync::Clamp);
    }

    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.query_input.push(text.to_string(), now);
    }

    /// Range shown by the slider, including a drag not yet applied.
    pub fn pending_year_range(&self) -> YearRange {
        if let Some(range) = self.year_input.pending() {
            return *range;
        }
        match &self.state.year {
            YearFilter::Range(range) => *range,
            YearFilter::Single(_) => YearRange::full(self.year_count()),
        }
    }

    pub fn year_slider(&self) -> YearSlider {
        YearSlider::new(self.year_count(), self.pending_year_range())
    }

    pub fn drag_year_start(&mut self, index: usize, now: Instant) {
        let mut slider = self.year_slider();
        slider.move_start(index);
        self.push_year(slider, now);
    }

    pub fn drag_year_end(&mut self, index: usize, now: Instant) {
        let mut slider = self.year_slider();
        slider.move_end(index);
        self.push_year(slider, now);
    }

    pub fn click_year(&mut self, index: usize, now: Instant) {
        let mut slider = self.year_slider();
        slider.click(index);
        self.push_year(slider, now);
    }

    fn push_year(&mut self, slider: YearSlider, now: Instant) {
        if slider.is_enabled() {
            self.year_input.push(slider.range(), now);
        }
    }

    pub fn select(&mut self, dimension: NameDimension, value: FilterValue<String>) {
        self.state.select(dimension, value);
        self.run_pass(PageSync::Clamp);
    }

    /// Picks one year (or "Unknown"). Choosing "All" returns the year
    /// dimension to the full slider span.
    pub fn select_year(&mut self, value: FilterValue<i32>) {
        self.year_input.flush();
        self.state.year = match value {
            FilterValue::All => YearFilter::Range(YearRange::full(self.year_count())),
            value => YearFilter::Single(value),
        };
        self.run_pass(PageSync::Clamp);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.results.len());
        self.dirty = true;
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.pagination
            .set_items_per_page(items_per_page, self.results.len(), PageSync::Clamp);
        self.dirty = true;
    }

    /// Applies debounced input that has come due. Returns whether a new
    /// pass ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(query) = self.query_input.poll(now) {
            changed |= query != self.state.query;
            self.state.query = query;
        }
        if let Some(range) = self.year_input.poll(now) {
            let range = YearFilter::Range(range);
            changed |= range != self.state.year;
            self.state.year = range;
        }
        if changed {
            log::debug!("debounced input applied; rerunning filter pass");
            self.run_pass(PageSync::Clamp);
        }
        changed
    }

    pub fn results(&self) -> &[usize] {
        &self.results
    }

    pub fn page(&self) -> Page<'_, usize> {
        self.pagination.page(&self.results)
    }

    pub fn page_records(&self) -> Vec<&Record> {
        let records = self.catalog.records();
        self.page()
            .items
            .iter()
            .filter_map(|idx| records.get(*idx))
            .collect()
    }

    pub fn bookmark(&self) -> String {
        let bookmark = Bookmark {
            filter: self.state.clone(),
            page: self.pagination.current_page,
        };
        query_state::encode(&bookmark, self.year_count())
    }

    /// Replaces the whole state from a bookmark, keeping its page.
    pub fn restore(&mut self, query: &str) {
        let bookmark = query_state::decode(query, &self.prepared.options);
        self.query_input.flush();
        self.year_input.flush();
        self.state = bookmark.filter;
        self.run_pass(PageSync::Preserve);
        self.pagination.set_page(bookmark.page, self.results.len());
    }

    fn run_pass(&mut self, mode: PageSync) {
        let snapshot = self.state.clone();
        self.results = run_filter_pass(
            self.catalog.records(),
            &self.prepared.index,
            &self.prepared.options,
            &snapshot,
        );
        self.pagination.sync(self.results.len(), mode);
        self.dirty = true;
        self.set_status(&format!("{} of {} records", self.results.len(), self.catalog.len()));
    }

    fn set_status(&mut self, message: &str) {
        self.status = message.to_string();
    }
}
