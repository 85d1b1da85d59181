use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type RecordId = u64;

pub const ALL_LABEL: &str = "All";
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_deserializing)]
    pub(crate) year: Option<i32>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lyricist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub composer: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arranger: Vec<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub kind: Vec<String>,
}

impl Record {
    pub fn new(id: RecordId, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            album: None,
            date: None,
            year: None,
            length: None,
            genre: Vec::new(),
            lyricist: Vec::new(),
            composer: Vec::new(),
            arranger: Vec::new(),
            kind: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    /// Calendar year of `date`, set only by the normalizer.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn names(&self, dimension: NameDimension) -> &[String] {
        match dimension {
            NameDimension::Type => &self.kind,
            NameDimension::Lyricist => &self.lyricist,
            NameDimension::Composer => &self.composer,
            NameDimension::Arranger => &self.arranger,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Exact-match dimensions whose record values are lists of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameDimension {
    Type,
    Lyricist,
    Composer,
    Arranger,
}

impl NameDimension {
    pub const ALL: [Self; 4] = [Self::Type, Self::Lyricist, Self::Composer, Self::Arranger];

    pub fn param(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Lyricist => "lyricist",
            Self::Composer => "composer",
            Self::Arranger => "arranger",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Lyricist => "Lyricist",
            Self::Composer => "Composer",
            Self::Arranger => "Arranger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterValue<T> {
    #[default]
    All,
    Unknown,
    Value(T),
}

impl<T> FilterValue<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::All | Self::Unknown => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LABEL),
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
            Self::Value(value) => value.fmt(f),
        }
    }
}

impl FilterValue<String> {
    /// Parses a selector label, mapping the sentinel labels back to sentinels.
    pub fn from_label(label: &str) -> Self {
        match label {
            ALL_LABEL => Self::All,
            UNKNOWN_LABEL => Self::Unknown,
            other => Self::Value(other.to_string()),
        }
    }
}
