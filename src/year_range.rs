/// Pair of slider handle positions into the newest-first year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub start: usize,
    pub end: usize,
}

impl YearRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn full(year_count: usize) -> Self {
        Self {
            start: 0,
            end: year_count.saturating_sub(1),
        }
    }

    pub fn is_full(&self, year_count: usize) -> bool {
        self.start == 0 && self.end == year_count.saturating_sub(1)
    }

    /// Clamps both handles into the list and swaps them if reversed.
    pub fn clamped(self, year_count: usize) -> Self {
        let last = year_count.saturating_sub(1);
        let start = self.start.min(last);
        let end = self.end.min(last);
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelection {
    Any,
    Years(Vec<i32>),
}

impl YearSelection {
    pub fn contains(&self, year: Option<i32>) -> bool {
        match self {
            Self::Any => true,
            Self::Years(years) => year.is_some_and(|year| years.contains(&year)),
        }
    }
}

pub fn select_years(range: YearRange, years: &[i32]) -> YearSelection {
    if years.is_empty() {
        return YearSelection::Any;
    }
    let range = range.clamped(years.len());
    if range.is_full(years.len()) {
        return YearSelection::Any;
    }
    YearSelection::Years(years[range.start..=range.end].to_vec())
}

/// Handle interactions for a slider over `year_count` distinct years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSlider {
    year_count: usize,
    range: YearRange,
}

impl YearSlider {
    pub fn new(year_count: usize, range: YearRange) -> Self {
        let mut slider = Self {
            year_count,
            range: YearRange::full(year_count),
        };
        if slider.is_enabled() {
            slider.range = range.clamped(year_count);
        }
        slider
    }

    pub fn is_enabled(&self) -> bool {
        self.year_count > 1
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    fn last(&self) -> usize {
        self.year_count.saturating_sub(1)
    }

    pub fn move_start(&mut self, index: usize) {
        if self.is_enabled() {
            self.range.start = index.min(self.last()).min(self.range.end);
        }
    }

    pub fn move_end(&mut self, index: usize) {
        if self.is_enabled() {
            self.range.end = index.min(self.last()).max(self.range.start);
        }
    }

    /// Moves whichever handle is nearer to `index`.
    pub fn click(&mut self, index: usize) {
        if !self.is_enabled() {
            return;
        }
        let index = index.min(self.last());
        let to_start = index.abs_diff(self.range.start);
        let to_end = index.abs_diff(self.range.end);
        if to_start < to_end || (to_start == to_end && index <= self.range.start) {
            self.move_start(index);
        } else {
            self.move_end(index);
        }
    }
}
