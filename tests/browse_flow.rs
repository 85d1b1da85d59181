use catalog::cache::PreparedCache;
use catalog::config::{EngineConfig, SearchConfig};
use catalog::filter::{FilterState, YearFilter, run_filter_pass};
use catalog::model::{FilterValue, NameDimension, Record};
use catalog::normalize::Catalog;
use catalog::options::compute_filter_options;
use catalog::pagination::paginate;
use catalog::search::SearchIndex;
use catalog::session::BrowseSession;
use catalog::year_range::YearRange;
use std::time::{Duration, Instant};

fn seasons() -> Catalog {
    Catalog::new(vec![
        Record::new(1, "Spring").with_date("2020-03-01"),
        Record::new(2, "Winter"),
        Record::new(3, "Autumn").with_date("2021-09-01"),
    ])
}

fn ids(catalog: &Catalog, indices: &[usize]) -> Vec<u64> {
    indices.iter().map(|idx| catalog.records()[*idx].id).collect()
}

#[test]
fn three_record_walkthrough() {
    let catalog = seasons();
    let titles: Vec<&str> = catalog.records().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Autumn", "Spring", "Winter"]);

    let options = compute_filter_options(catalog.records(), &[]);
    let year_labels: Vec<String> = options.year.iter().map(ToString::to_string).collect();
    assert_eq!(year_labels, vec!["All", "2021", "2020", "Unknown"]);

    let index = SearchIndex::build(catalog.records(), &SearchConfig::default());
    let mut state = FilterState::new(&options);
    let all = run_filter_pass(catalog.records(), &index, &options, &state);
    assert_eq!(ids(&catalog, &all), vec![3, 1, 2]);

    state.year = YearFilter::Range(YearRange::new(0, 0));
    let narrowed = run_filter_pass(catalog.records(), &index, &options, &state);
    assert_eq!(ids(&catalog, &narrowed), vec![3]);

    state.year = YearFilter::Range(YearRange::full(2));
    state.query = String::from("wintr");
    let searched = run_filter_pass(catalog.records(), &index, &options, &state);
    assert_eq!(ids(&catalog, &searched), vec![2]);

    let page = paginate(&all, 2, 5);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.current_page, 2);
    assert_eq!(ids(&catalog, page.items), vec![2]);
    assert_eq!((page.start_index, page.end_index), (3, 3));
}

#[test]
fn session_flow_with_debounce_and_bookmark() {
    let mut cache = PreparedCache::new(EngineConfig {
        items_per_page: 1,
        ..EngineConfig::default()
    });
    let mut session = BrowseSession::new(seasons(), &mut cache);
    assert_eq!(session.page().total_pages, 3);

    let start = Instant::now();
    session.set_query("autum", start);
    session.set_query("autumn", start + Duration::from_millis(120));
    assert!(!session.tick(start + Duration::from_millis(300)));
    assert!(session.tick(start + Duration::from_millis(420)));
    assert_eq!(session.page_records()[0].title, "Autumn");

    session.select(NameDimension::Composer, FilterValue::Unknown);
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.bookmark(), "q=autumn&composer=Unknown");

    let mut other = BrowseSession::new(seasons(), &mut cache);
    other.restore("?q=autumn&composer=Unknown&page=9");
    assert_eq!(other.pagination.current_page, 1);
    assert_eq!(other.results().len(), 1);
}
