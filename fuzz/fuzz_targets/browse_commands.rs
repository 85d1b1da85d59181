#![no_main]

use catalog::cache::PreparedCache;
use catalog::config::EngineConfig;
use catalog::model::{FilterValue, NameDimension, Record};
use catalog::normalize::Catalog;
use catalog::session::BrowseSession;
use libfuzzer_sys::fuzz_target;
use std::time::{Duration, Instant};

fuzz_target!(|data: &[u8]| {
    let records = (0..(data.len() % 16))
        .map(|idx| {
            let mut record = Record::new(idx as u64, &format!("title {idx}"))
                .with_date(&format!("{}-01-01", 2000 + idx % 4));
            record.lyricist = vec![format!("name {}", idx % 3)];
            record
        })
        .collect();
    let mut cache = PreparedCache::new(EngineConfig::default());
    let mut session = BrowseSession::new(Catalog::new(records), &mut cache);

    let text = String::from_utf8_lossy(data);
    session.restore(&text);

    let start = Instant::now();
    for (step, byte) in data.iter().enumerate() {
        let now = start + Duration::from_millis(step as u64 * 100);
        let index = usize::from(byte >> 3);
        match byte % 8 {
            0 => {
                let prefix: String = text.chars().take(index).collect();
                session.set_query(&prefix, now);
            }
            1 => session.drag_year_start(index, now),
            2 => session.drag_year_end(index, now),
            3 => session.click_year(index, now),
            4 => session.set_page(index),
            5 => session.set_items_per_page(index),
            6 => session.select(NameDimension::Lyricist, FilterValue::Value(format!("name {}", index % 4))),
            _ => {
                session.tick(now);
            }
        }

        let page = session.page();
        assert!(page.current_page >= 1);
        assert!(page.current_page <= page.total_pages.max(1));
        let range = session.pending_year_range();
        assert!(range.start <= range.end);
    }
});
