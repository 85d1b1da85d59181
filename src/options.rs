use crate::model::{FilterValue, NameDimension, Record};
use crate::names::sort_names;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub kind: Vec<FilterValue<String>>,
    pub year: Vec<FilterValue<i32>>,
    pub lyricist: Vec<FilterValue<String>>,
    pub composer: Vec<FilterValue<String>>,
    pub arranger: Vec<FilterValue<String>>,
}

impl FilterOptions {
    pub fn names(&self, dimension: NameDimension) -> &[FilterValue<String>] {
        match dimension {
            NameDimension::Type => &self.kind,
            NameDimension::Lyricist => &self.lyricist,
            NameDimension::Composer => &self.composer,
            NameDimension::Arranger => &self.arranger,
        }
    }

    /// Distinct years, newest first, without sentinels.
    pub fn year_values(&self) -> Vec<i32> {
        self.year.iter().filter_map(|year| year.value().copied()).collect()
    }
}

pub fn compute_filter_options(records: &[Record], type_priority: &[String]) -> FilterOptions {
    FilterOptions {
        kind: type_options(records, type_priority),
        year: year_options(records),
        lyricist: name_options(records, NameDimension::Lyricist),
        composer: name_options(records, NameDimension::Composer),
        arranger: name_options(records, NameDimension::Arranger),
    }
}

fn with_sentinels<T>(values: impl IntoIterator<Item = T>, has_unknown: bool) -> Vec<FilterValue<T>> {
    let mut out = vec![FilterValue::All];
    out.extend(values.into_iter().map(FilterValue::Value));
    if has_unknown {
        out.push(FilterValue::Unknown);
    }
    out
}

fn name_options(records: &[Record], dimension: NameDimension) -> Vec<FilterValue<String>> {
    let mut seen = HashSet::new();
    let mut has_unknown = false;
    for record in records {
        let names = record.names(dimension);
        if names.is_empty() {
            has_unknown = true;
        }
        seen.extend(names.iter().map(String::as_str));
    }
    with_sentinels(sort_names(seen), has_unknown)
}

fn year_options(records: &[Record]) -> Vec<FilterValue<i32>> {
    let mut years = BTreeSet::new();
    let mut has_unknown = false;
    for record in records {
        match record.year() {
            Some(year) => {
                years.insert(year);
            }
            None => has_unknown = true,
        }
    }
    with_sentinels(years.into_iter().rev(), has_unknown)
}

fn type_options(records: &[Record], type_priority: &[String]) -> Vec<FilterValue<String>> {
    let mut encountered: Vec<&str> = Vec::new();
    let mut seen = HashSet::new();
    let mut has_unknown = false;
    for record in records {
        if record.kind.is_empty() {
            has_unknown = true;
        }
        for kind in &record.kind {
            if seen.insert(kind.as_str()) {
                encountered.push(kind);
            }
        }
    }

    let mut ordered: Vec<String> = Vec::with_capacity(encountered.len());
    for kind in type_priority {
        if seen.contains(kind.as_str()) && !ordered.contains(kind) {
            ordered.push(kind.clone());
        }
    }
    for kind in encountered {
        if !type_priority.iter().any(|known| known == kind) {
            ordered.push(kind.to_string());
        }
    }
    with_sentinels(ordered, has_unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_records;

    fn record(id: u64, date: Option<&str>) -> Record {
        Record {
            date: date.map(str::to_string),
            ..Record::new(id, "t")
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn year_options_are_descending_with_unknown_last() {
        let records = normalize_records(vec![
            record(1, Some("2020-03-01")),
            record(2, None),
            record(3, Some("2021-09-01")),
        ]);
        let options = compute_filter_options(&records, &[]);
        assert_eq!(
            options.year,
            vec![
                FilterValue::All,
                FilterValue::Value(2021),
                FilterValue::Value(2020),
                FilterValue::Unknown,
            ]
        );
        assert_eq!(options.year_values(), vec![2021, 2020]);
    }

    #[test]
    fn unknown_only_appears_when_some_record_lacks_value() {
        let records = vec![
            Record {
                lyricist: names(&["Sato"]),
                ..record(1, Some("2020-01-01"))
            },
            Record {
                lyricist: names(&["Abe", "Sato"]),
                ..record(2, Some("2020-01-01"))
            },
        ];
        let records = normalize_records(records);
        let options = compute_filter_options(&records, &[]);
        assert_eq!(
            options.lyricist,
            vec![
                FilterValue::All,
                FilterValue::Value(String::from("Abe")),
                FilterValue::Value(String::from("Sato")),
            ]
        );
        assert_eq!(
            options.composer,
            vec![FilterValue::All, FilterValue::Unknown]
        );
        assert_eq!(options.year, vec![FilterValue::All, FilterValue::Value(2020)]);
    }

    #[test]
    fn type_uses_priority_then_encounter_order() {
        let records = vec![
            Record {
                kind: names(&["Remix"]),
                ..record(1, None)
            },
            Record {
                kind: names(&["Cover", "Medley"]),
                ..record(2, None)
            },
            Record {
                kind: names(&["Original"]),
                ..record(3, None)
            },
            record(4, None),
        ];
        let priority = names(&["Original", "Arrangement", "Cover"]);
        let options = compute_filter_options(&records, &priority);
        let labels: Vec<String> = options.kind.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["All", "Original", "Cover", "Remix", "Medley", "Unknown"]
        );
    }

    #[test]
    fn empty_dataset_only_has_all() {
        let options = compute_filter_options(&[], &[]);
        assert_eq!(options.year, vec![FilterValue::All]);
        assert_eq!(options.kind, vec![FilterValue::All]);
        assert!(options.year_values().is_empty());
    }
}
