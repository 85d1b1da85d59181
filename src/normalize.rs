use crate::model::Record;
use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Month, PrimitiveDateTime, Time};

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one loaded record set. Equal data loaded twice gets two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(u64);

/// Immutable, normalized record set in canonical order.
#[derive(Debug, Clone)]
pub struct Catalog {
    id: SnapshotId,
    records: Arc<[Record]>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        let records = normalize_records(records);
        let id = SnapshotId(NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed));
        log::debug!("catalog snapshot {} with {} records", id.0, records.len());
        Self {
            id,
            records: records.into(),
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn normalize_record(mut record: Record) -> Record {
    record.year = record.date.as_deref().and_then(parse_date).map(Date::year);
    record
}

/// Normalizes every record and applies canonical order: newest `date`
/// first (time of day included when present), undated last, input order
/// kept among equals.
pub fn normalize_records(records: Vec<Record>) -> Vec<Record> {
    let mut records: Vec<Record> = records.into_iter().map(normalize_record).collect();
    records.sort_by_cached_key(|record| Reverse(record.date.as_deref().and_then(parse_timestamp)));
    records
}

/// Date plus the leading `HH:MM[:SS]` of a time part. A missing or
/// unreadable time counts as midnight; offsets are ignored.
pub fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let date = parse_date(raw)?;
    let time = raw
        .trim()
        .get(11..)
        .and_then(parse_time_of_day)
        .unwrap_or(Time::MIDNIGHT);
    Some(PrimitiveDateTime::new(date, time))
}

fn parse_time_of_day(raw: &str) -> Option<Time> {
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(raw.len());
    let mut parts = raw[..end].split(':');
    let hour = parse_fixed(parts.next()?, 2)?;
    let minute = parse_fixed(parts.next()?, 2)?;
    let second = match parts.next() {
        Some(second) => parse_fixed(second, 2)?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Time::from_hms(
        u8::try_from(hour).ok()?,
        u8::try_from(minute).ok()?,
        u8::try_from(second).ok()?,
    )
    .ok()
}

/// Accepts `YYYY-MM-DD` (optionally followed by a time part), `YYYY-MM`
/// and `YYYY`.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let day_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    if day_part.len() != raw.len() && day_part.len() != 10 {
        return None;
    }

    let mut parts = day_part.split('-');
    let year = parse_fixed(parts.next()?, 4)?;
    let month = match parts.next() {
        Some(month) => parse_fixed(month, 2)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(day) => parse_fixed(day, 2)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }

    let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
    Date::from_calendar_date(year, month, u8::try_from(day).ok()?).ok()
}

fn parse_fixed(part: &str, width: usize) -> Option<i32> {
    if part.len() != width || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
