use crate::config::SearchConfig;
use crate::model::Record;
use unicode_normalization::UnicodeNormalization;

const MIN_FIELD_SCORE: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Album,
    Lyricist,
    Composer,
    Arranger,
    Composite,
}

impl SearchField {
    const ALL: [Self; 6] = [
        Self::Title,
        Self::Album,
        Self::Lyricist,
        Self::Composer,
        Self::Arranger,
        Self::Composite,
    ];

    fn weight(self, config: &SearchConfig) -> f64 {
        let weights = &config.weights;
        match self {
            Self::Title => weights.title,
            Self::Album => weights.album,
            Self::Lyricist => weights.lyricist,
            Self::Composer => weights.composer,
            Self::Arranger => weights.arranger,
            Self::Composite => weights.composite,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldText {
    chars: Vec<char>,
    norm: f64,
}

impl FieldText {
    fn new(raw: &str) -> Option<Self> {
        let chars: Vec<char> = fold(raw).chars().collect();
        if chars.is_empty() {
            return None;
        }
        let tokens = raw.split_whitespace().count().max(1);
        Some(Self {
            chars,
            norm: 1.0 / (tokens as f64).sqrt(),
        })
    }
}

#[derive(Debug, Clone)]
struct SearchEntry {
    fields: Vec<(SearchField, Vec<FieldText>)>,
}

/// Weighted approximate-match index over one record snapshot.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    weights: Vec<(SearchField, f64)>,
    threshold: f64,
    min_match_char_length: usize,
}

impl SearchIndex {
    pub fn build(records: &[Record], config: &SearchConfig) -> Self {
        let entries = records.iter().map(index_record).collect();

        let total: f64 = SearchField::ALL
            .iter()
            .map(|field| field.weight(config).max(0.0))
            .sum();
        let weights = SearchField::ALL
            .iter()
            .map(|field| {
                let weight = field.weight(config).max(0.0);
                let normalized = if total > 0.0 { weight / total } else { 1.0 };
                (*field, normalized)
            })
            .collect();

        log::debug!("built search index over {} records", records.len());
        Self {
            entries,
            weights,
            threshold: config.threshold.clamp(0.0, 1.0),
            min_match_char_length: config.min_match_char_length.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns record indices. A blank query keeps every record in
    /// canonical order; otherwise only matches, best first.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let pattern: Vec<char> = fold(query.trim()).chars().collect();
        if pattern.is_empty() {
            return (0..self.entries.len()).collect();
        }
        if pattern.len() < self.min_match_char_length {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| self.score_entry(entry, &pattern).map(|s| (idx, s)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    fn score_entry(&self, entry: &SearchEntry, pattern: &[char]) -> Option<f64> {
        let mut total = 1.0_f64;
        let mut matched = false;

        for (field, texts) in &entry.fields {
            let Some(weight) = self
                .weights
                .iter()
                .find(|(candidate, _)| candidate == field)
                .map(|(_, weight)| *weight)
            else {
                continue;
            };

            let best = texts
                .iter()
                .map(|text| (field_score(&text.chars, pattern), text.norm))
                .min_by(|a, b| a.0.total_cmp(&b.0));
            let Some((score, norm)) = best else {
                continue;
            };
            if score > self.threshold {
                continue;
            }

            matched = true;
            total *= score.max(MIN_FIELD_SCORE).powf(weight * norm);
        }

        matched.then_some(total)
    }
}

fn index_record(record: &Record) -> SearchEntry {
    let mut fields = Vec::with_capacity(SearchField::ALL.len());
    let mut composite = Vec::new();

    let mut push = |field: SearchField, values: Vec<&str>| {
        composite.extend(values.iter().map(|value| value.to_string()));
        let texts: Vec<FieldText> = values.into_iter().filter_map(FieldText::new).collect();
        if !texts.is_empty() {
            fields.push((field, texts));
        }
    };

    push(SearchField::Title, vec![record.title.as_str()]);
    push(SearchField::Album, record.album.as_deref().into_iter().collect());
    push(SearchField::Lyricist, record.lyricist.iter().map(String::as_str).collect());
    push(SearchField::Composer, record.composer.iter().map(String::as_str).collect());
    push(SearchField::Arranger, record.arranger.iter().map(String::as_str).collect());

    if let Some(text) = FieldText::new(&composite.join(" ")) {
        fields.push((SearchField::Composite, vec![text]));
    }
    SearchEntry { fields }
}

fn fold(text: &str) -> String {
    text.nfkc().flat_map(char::to_lowercase).collect()
}

/// Edit distance of `pattern` against its best-matching substring of
/// `text`, divided by the pattern length. 0 is an exact occurrence.
fn field_score(text: &[char], pattern: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }

    // column over pattern positions; row 0 is free so a match may start anywhere
    let mut column: Vec<usize> = (0..=pattern.len()).collect();
    let mut best = column[pattern.len()];
    for ch in text {
        let mut diagonal = column[0];
        for (i, expected) in pattern.iter().enumerate() {
            let above = column[i + 1];
            let substitution = diagonal + usize::from(expected != ch);
            column[i + 1] = substitution.min(above + 1).min(column[i] + 1);
            diagonal = above;
        }
        best = best.min(column[pattern.len()]);
    }
    best as f64 / pattern.len() as f64
}
