use crate::filter::{FilterState, YearFilter};
use crate::model::{ALL_LABEL, FilterValue, NameDimension, UNKNOWN_LABEL};
use crate::options::FilterOptions;
use crate::year_range::YearRange;
use url::form_urlencoded;

const QUERY_PARAM: &str = "q";
const YEAR_PARAM: &str = "year";
const YEAR_START_PARAM: &str = "yearStart";
const YEAR_END_PARAM: &str = "yearEnd";
const PAGE_PARAM: &str = "page";
/// Prefix that keeps a name spelled like a sentinel label from decoding
/// as the sentinel.
const ESCAPE: char = '~';

/// Filter and page state as carried in a bookmarkable query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub filter: FilterState,
    pub page: usize,
}

impl Bookmark {
    pub fn new(options: &FilterOptions) -> Self {
        Self {
            filter: FilterState::new(options),
            page: 1,
        }
    }
}

/// Serializes only the parameters that differ from their defaults.
pub fn encode(bookmark: &Bookmark, year_count: usize) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    let filter = &bookmark.filter;

    if !filter.query.is_empty() {
        out.append_pair(QUERY_PARAM, &filter.query);
    }
    for dimension in NameDimension::ALL {
        let selected = filter.selection(dimension);
        if !selected.is_all() {
            out.append_pair(dimension.param(), &name_label(selected));
        }
    }
    match &filter.year {
        YearFilter::Range(range) => {
            if !range.is_full(year_count) {
                out.append_pair(YEAR_START_PARAM, &range.start.to_string());
                out.append_pair(YEAR_END_PARAM, &range.end.to_string());
            }
        }
        YearFilter::Single(value) => {
            if !value.is_all() {
                out.append_pair(YEAR_PARAM, &value.to_string());
            }
        }
    }
    if bookmark.page != 1 {
        out.append_pair(PAGE_PARAM, &bookmark.page.to_string());
    }
    out.finish()
}

/// Rebuilds state from a query string. Missing or malformed parameters
/// fall back to defaults; year indices are clamped to the current list.
pub fn decode(input: &str, options: &FilterOptions) -> Bookmark {
    let input = input.strip_prefix('?').unwrap_or(input);
    let year_count = options.year_values().len();
    let mut bookmark = Bookmark::new(options);
    let mut year_start = None;
    let mut year_end = None;

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        match &*key {
            QUERY_PARAM => bookmark.filter.query = value.into_owned(),
            YEAR_PARAM => {
                let year = match &*value {
                    ALL_LABEL => None,
                    UNKNOWN_LABEL => Some(FilterValue::Unknown),
                    _ => parse_number::<i32>(&key, &value).map(FilterValue::Value),
                };
                if let Some(year) = year {
                    bookmark.filter.year = YearFilter::Single(year);
                }
            }
            YEAR_START_PARAM => year_start = parse_number::<usize>(&key, &value),
            YEAR_END_PARAM => year_end = parse_number::<usize>(&key, &value),
            PAGE_PARAM => {
                if let Some(page) = parse_number::<usize>(&key, &value).filter(|page| *page > 0) {
                    bookmark.page = page;
                }
            }
            other => {
                if let Some(dimension) = NameDimension::ALL.into_iter().find(|d| d.param() == other) {
                    bookmark.filter.select(dimension, parse_name_label(&value));
                } else {
                    log::debug!("ignoring unknown bookmark parameter {other}");
                }
            }
        }
    }

    if matches!(bookmark.filter.year, YearFilter::Range(_))
        && (year_start.is_some() || year_end.is_some())
    {
        let full = YearRange::full(year_count);
        let range = YearRange::new(year_start.unwrap_or(full.start), year_end.unwrap_or(full.end));
        bookmark.filter.year = YearFilter::Range(range.clamped(year_count));
    }
    bookmark
}

fn name_label(selected: &FilterValue<String>) -> String {
    match selected {
        FilterValue::Value(name)
            if name == ALL_LABEL || name == UNKNOWN_LABEL || name.starts_with(ESCAPE) =>
        {
            format!("{ESCAPE}{name}")
        }
        other => other.to_string(),
    }
}

fn parse_name_label(label: &str) -> FilterValue<String> {
    match label.strip_prefix(ESCAPE) {
        Some(name) => FilterValue::Value(name.to_string()),
        None => FilterValue::from_label(label),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        log::debug!("ignoring malformed bookmark parameter {key}={value}");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::normalize::normalize_records;
    use crate::options::compute_filter_options;
    use proptest::prelude::*;

    fn options() -> FilterOptions {
        let records = normalize_records(
            ["2023-01-01", "2022-01-01", "2021-01-01", "2020-01-01"]
                .iter()
                .enumerate()
                .map(|(idx, date)| Record {
                    date: Some(date.to_string()),
                    lyricist: vec![String::from("Sato")],
                    ..Record::new(idx as u64, "t")
                })
                .collect(),
        );
        compute_filter_options(&records, &[])
    }

    #[test]
    fn default_state_encodes_to_empty_string() {
        let options = options();
        assert_eq!(encode(&Bookmark::new(&options), 4), "");
        assert_eq!(decode("", &options), Bookmark::new(&options));
    }

    #[test]
    fn state_round_trips() {
        let options = options();
        let mut bookmark = Bookmark::new(&options);
        bookmark.filter.query = String::from("春 の歌&more");
        bookmark.filter.select(NameDimension::Lyricist, FilterValue::Value(String::from("Sato")));
        bookmark.filter.select(NameDimension::Arranger, FilterValue::Unknown);
        bookmark.filter.year = YearFilter::Range(YearRange::new(1, 2));
        bookmark.page = 3;

        let encoded = encode(&bookmark, 4);
        assert!(encoded.contains("yearStart=1&yearEnd=2"));
        assert!(encoded.contains("arranger=Unknown"));
        assert!(!encoded.contains("type="));
        assert_eq!(decode(&encoded, &options), bookmark);
    }

    #[test]
    fn single_year_form_round_trips() {
        let options = options();
        let mut bookmark = Bookmark::new(&options);
        bookmark.filter.year = YearFilter::Single(FilterValue::Unknown);
        let encoded = encode(&bookmark, 4);
        assert_eq!(encoded, "year=Unknown");
        assert_eq!(decode(&encoded, &options), bookmark);

        bookmark.filter.year = YearFilter::Single(FilterValue::Value(2021));
        assert_eq!(decode(&encode(&bookmark, 4), &options), bookmark);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let options = options();
        let decoded = decode("?page=abc&yearStart=-1&year=soon&q=x", &options);
        let mut expected = Bookmark::new(&options);
        expected.filter.query = String::from("x");
        assert_eq!(decoded, expected);
        assert_eq!(decode("page=0", &options).page, 1);
    }

    #[test]
    fn range_indices_clamp_and_reorder() {
        let options = options();
        let decoded = decode("yearStart=9&yearEnd=1", &options);
        assert_eq!(decoded.filter.year, YearFilter::Range(YearRange::new(1, 3)));

        let decoded = decode("yearEnd=2", &options);
        assert_eq!(decoded.filter.year, YearFilter::Range(YearRange::new(0, 2)));
    }

    #[test]
    fn names_spelled_like_sentinels_stay_values() {
        let options = options();
        let mut bookmark = Bookmark::new(&options);
        bookmark.filter.select(NameDimension::Lyricist, FilterValue::Value(String::from("Unknown")));
        bookmark.filter.select(NameDimension::Composer, FilterValue::Value(String::from("All")));
        bookmark.filter.select(NameDimension::Arranger, FilterValue::Value(String::from("~Ito")));

        let encoded = encode(&bookmark, 4);
        assert_eq!(encoded, "lyricist=%7EUnknown&composer=%7EAll&arranger=%7E%7EIto");
        assert_eq!(decode(&encoded, &options), bookmark);
        assert_eq!(
            decode("lyricist=Unknown", &options).filter.lyricist,
            FilterValue::Unknown
        );
    }

    fn arb_name() -> impl Strategy<Value = FilterValue<String>> {
        prop_oneof![
            Just(FilterValue::All),
            Just(FilterValue::Unknown),
            proptest::sample::select(vec!["Sato", "All", "Unknown", "~x", "a&b=c", ""])
                .prop_map(|name| FilterValue::Value(name.to_string())),
            "\\PC{0,8}".prop_map(FilterValue::Value),
        ]
    }

    fn arb_year() -> impl Strategy<Value = YearFilter> {
        prop_oneof![
            (0usize..6, 0usize..6)
                .prop_map(|(start, end)| YearFilter::Range(YearRange::new(start, end).clamped(4))),
            Just(YearFilter::Single(FilterValue::Unknown)),
            (1990i32..2030).prop_map(|year| YearFilter::Single(FilterValue::Value(year))),
        ]
    }

    fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
        (
            "\\PC{0,12}",
            proptest::array::uniform4(arb_name()),
            arb_year(),
            1usize..500,
        )
            .prop_map(|(query, names, year, page)| {
                let mut bookmark = Bookmark::new(&options());
                bookmark.filter.query = query;
                for (dimension, value) in NameDimension::ALL.into_iter().zip(names) {
                    bookmark.filter.select(dimension, value);
                }
                bookmark.filter.year = year;
                bookmark.page = page;
                bookmark
            })
    }

    fn arb_query_string() -> impl Strategy<Value = String> {
        let key = proptest::sample::select(vec![
            "q", "type", "lyricist", "composer", "arranger", "year", "yearStart", "yearEnd",
            "page", "other",
        ]);
        proptest::collection::vec((key, "[A-Za-z0-9~%+ -]{0,6}"), 0..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("&")
        })
    }

    proptest! {
        #[test]
        fn clamped_state_round_trips(bookmark in arb_bookmark()) {
            let options = options();
            let encoded = encode(&bookmark, 4);
            prop_assert_eq!(decode(&encoded, &options), bookmark);
        }

        #[test]
        fn decoded_state_is_canonical(input in arb_query_string()) {
            let options = options();
            let decoded = decode(&input, &options);
            let encoded = encode(&decoded, 4);
            prop_assert_eq!(decode(&encoded, &options), decoded.clone());
            prop_assert_eq!(encode(&decode(&encoded, &options), 4), encoded);
        }
    }
}
