use crate::model::{FilterValue, NameDimension, Record};
use crate::options::FilterOptions;
use crate::search::SearchIndex;
use crate::year_range::{YearRange, YearSelection, select_years};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearFilter {
    Range(YearRange),
    Single(FilterValue<i32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub kind: FilterValue<String>,
    pub lyricist: FilterValue<String>,
    pub composer: FilterValue<String>,
    pub arranger: FilterValue<String>,
    pub year: YearFilter,
}

impl FilterState {
    /// Everything set to "All", the year range spanning every year.
    pub fn new(options: &FilterOptions) -> Self {
        Self {
            query: String::new(),
            kind: FilterValue::All,
            lyricist: FilterValue::All,
            composer: FilterValue::All,
            arranger: FilterValue::All,
            year: YearFilter::Range(YearRange::full(options.year_values().len())),
        }
    }

    pub fn selection(&self, dimension: NameDimension) -> &FilterValue<String> {
        match dimension {
            NameDimension::Type => &self.kind,
            NameDimension::Lyricist => &self.lyricist,
            NameDimension::Composer => &self.composer,
            NameDimension::Arranger => &self.arranger,
        }
    }

    pub fn select(&mut self, dimension: NameDimension, value: FilterValue<String>) {
        let slot = match dimension {
            NameDimension::Type => &mut self.kind,
            NameDimension::Lyricist => &mut self.lyricist,
            NameDimension::Composer => &mut self.composer,
            NameDimension::Arranger => &mut self.arranger,
        };
        *slot = value;
    }

    /// Keeps the year range valid for a (possibly changed) year list.
    pub fn clamp_year_range(&mut self, year_count: usize) {
        if let YearFilter::Range(range) = &mut self.year {
            *range = range.clamped(year_count);
        }
    }
}

/// The year dimension resolved against the current year list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum YearPredicate {
    Slider(YearSelection),
    Single(FilterValue<i32>),
}

impl YearPredicate {
    fn resolve(filter: &YearFilter, years: &[i32]) -> Self {
        match filter {
            YearFilter::Range(range) => Self::Slider(select_years(*range, years)),
            YearFilter::Single(value) => Self::Single(value.clone()),
        }
    }

    fn matches(&self, year: Option<i32>) -> bool {
        match self {
            Self::Slider(selection) => selection.contains(year),
            Self::Single(FilterValue::All) => true,
            Self::Single(FilterValue::Unknown) => year.is_none(),
            Self::Single(FilterValue::Value(expected)) => year == Some(*expected),
        }
    }
}

pub fn matches_names(values: &[String], selected: &FilterValue<String>) -> bool {
    match selected {
        FilterValue::All => true,
        FilterValue::Unknown => values.is_empty(),
        FilterValue::Value(expected) => values.iter().any(|value| value == expected),
    }
}

/// Keeps the candidates that satisfy every active predicate, in the
/// candidates' order.
pub fn apply_filters(
    records: &[Record],
    candidates: &[usize],
    state: &FilterState,
    years: &[i32],
) -> Vec<usize> {
    let year = YearPredicate::resolve(&state.year, years);
    candidates
        .iter()
        .copied()
        .filter(|idx| {
            let Some(record) = records.get(*idx) else {
                return false;
            };
            NameDimension::ALL
                .iter()
                .all(|dimension| matches_names(record.names(*dimension), state.selection(*dimension)))
                && year.matches(record.year())
        })
        .collect()
}

/// Search (when the query is not blank) followed by every filter.
pub fn run_filter_pass(
    records: &[Record],
    index: &SearchIndex,
    options: &FilterOptions,
    state: &FilterState,
) -> Vec<usize> {
    let candidates = if index.len() == records.len() {
        index.search(&state.query)
    } else {
        log::warn!(
            "search index covers {} records but snapshot has {}; skipping ranking",
            index.len(),
            records.len()
        );
        (0..records.len()).collect()
    };
    apply_filters(records, &candidates, state, &options.year_values())
}
