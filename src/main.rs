use anyhow::{Context, Result};
use catalog::cache::PreparedCache;
use catalog::config;
use catalog::model::{FilterValue, NameDimension, Record};
use catalog::normalize::Catalog;
use catalog::session::BrowseSession;
use log::LevelFilter;
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    records: Option<PathBuf>,
    config: Option<PathBuf>,
    state: Option<String>,
    page: Option<usize>,
    per_page: Option<usize>,
    show_options: bool,
    save_config: bool,
    verbosity: u8,
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    init_logger(args.verbosity);

    let mut engine_config = match &args.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    if args.save_config {
        if let Some(per_page) = args.per_page {
            engine_config.items_per_page = per_page;
        }
        let path = match &args.config {
            Some(path) => {
                config::save_config_to_path(path, &engine_config)?;
                path.clone()
            }
            None => config::save_config(&engine_config)?,
        };
        log::info!("wrote config to {}", path.display());
    }

    let Some(records_path) = args.records.as_ref() else {
        if args.save_config {
            return Ok(());
        }
        anyhow::bail!("--records <file.json> is required");
    };

    let raw = fs::read_to_string(records_path)
        .with_context(|| format!("failed to read records file {}", records_path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse records file {}", records_path.display()))?;
    log::info!("loaded {} records from {}", records.len(), records_path.display());

    let mut cache = PreparedCache::new(engine_config);
    let mut session = BrowseSession::new(Catalog::new(records), &mut cache);
    if let Some(state) = &args.state {
        session.restore(state);
    }
    if let Some(per_page) = args.per_page {
        session.set_items_per_page(per_page);
    }
    if let Some(page) = args.page {
        session.set_page(page);
    }

    if args.show_options {
        print_options(&session);
    }
    print_page(&session);
    Ok(())
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn print_options(session: &BrowseSession) {
    let options = session.options();
    for dimension in NameDimension::ALL {
        print_option_line(dimension.label(), options.names(dimension));
    }
    print_option_line("Year", &options.year);
    println!();
}

fn print_option_line<T: Display>(label: &str, values: &[FilterValue<T>]) {
    let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
    println!("{label}: {}", joined.join(", "));
}

fn print_page(session: &BrowseSession) {
    for record in session.page_records() {
        println!(
            "{} | {} | {}",
            record.title,
            record.album.as_deref().unwrap_or("-"),
            record.date.as_deref().unwrap_or("-")
        );
    }

    let page = session.page();
    println!(
        "{}-{} of {} (page {}/{})",
        page.start_index,
        page.end_index,
        page.total_items,
        page.current_page,
        page.total_pages.max(1)
    );
    let bookmark = session.bookmark();
    if !bookmark.is_empty() {
        println!("?{bookmark}");
    }
}

fn parse_args(args: Vec<String>) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--records" => out.records = Some(PathBuf::from(take_value(&args, &mut index, "--records")?)),
            "--config" => out.config = Some(PathBuf::from(take_value(&args, &mut index, "--config")?)),
            "--state" => out.state = Some(take_value(&args, &mut index, "--state")?),
            "--page" => {
                let value = take_value(&args, &mut index, "--page")?;
                out.page = Some(value.parse().with_context(|| format!("invalid --page {value}"))?);
            }
            "--per-page" => {
                let value = take_value(&args, &mut index, "--per-page")?;
                let per_page: usize = value
                    .parse()
                    .with_context(|| format!("invalid --per-page {value}"))?;
                if per_page == 0 {
                    anyhow::bail!("--per-page must be positive");
                }
                out.per_page = Some(per_page);
            }
            "--options" => out.show_options = true,
            "--save-config" => out.save_config = true,
            "-v" => out.verbosity = out.verbosity.saturating_add(1),
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn take_value(args: &[String], index: &mut usize, flag: &str) -> Result<String> {
    *index += 1;
    let Some(value) = args.get(*index) else {
        anyhow::bail!("{flag} requires a value");
    };
    Ok(value.clone())
}

fn print_help() {
    println!("catalog");
    println!("  --records file.json   Records to browse (required)");
    println!("  --state query         Bookmarked filter state, e.g. \"q=spring&type=Original\"");
    println!("  --page N              Page to show");
    println!("  --per-page N          Items per page");
    println!("  --options             Print selectable filter values");
    println!("  --config path         Engine config file");
    println!("  --save-config         Write the effective config (with --per-page) and continue");
    println!("  -v                    More logging (repeatable)");
}
