use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use hsn_cli::config::AppConfig;
use hsn_cli::types::{LookupReport, StatsReport, SuggestReport, ValidateReport};
use hsn_core::CodeBook;
use hsn_map::Suggester;
use hsn_model::{HierarchyMode, ScorerKind};
use hsn_standards::{CsvTableLoader, table_path};
use hsn_validate::Validator;

use crate::cli::{Cli, HierarchyArg, LookupArgs, ScorerArg, SuggestArgs, ValidateArgs};

/// Resolve the table path and build the code book from it.
pub fn load_code_book(cli: &Cli, config: &AppConfig) -> Result<CodeBook> {
    let path = table_path(cli.table.as_deref(), config.table.path.as_deref());
    let loader = CsvTableLoader::new(&path).with_layout(config.table.layout());
    let start = Instant::now();
    let book = CodeBook::from_loader(&loader)
        .with_context(|| format!("load reference table {}", path.display()))?;
    info!(
        path = %path.display(),
        codes = book.len(),
        duration_ms = start.elapsed().as_millis(),
        "code book ready"
    );
    Ok(book)
}

pub fn run_validate(book: &CodeBook, args: &ValidateArgs, config: &AppConfig) -> ValidateReport {
    let mut options = config.validate;
    if let Some(hierarchy) = args.hierarchy {
        options.hierarchy = match hierarchy {
            HierarchyArg::Placeholder => HierarchyMode::Placeholder,
            HierarchyArg::Full => HierarchyMode::Full,
        };
    }
    let results = Validator::new(book)
        .with_options(options)
        .validate_bulk(&args.codes);
    ValidateReport::new(results)
}

pub fn run_suggest(book: &CodeBook, args: &SuggestArgs, config: &AppConfig) -> SuggestReport {
    let mut options = config.suggest;
    if let Some(limit) = args.limit {
        options.limit = limit;
    }
    if let Some(min_confidence) = args.min_confidence {
        options.min_confidence = min_confidence;
    }
    if let Some(scorer) = args.scorer {
        options.scorer = match scorer {
            ScorerArg::TokenSet => ScorerKind::TokenSet,
            ScorerArg::JaroWinkler => ScorerKind::JaroWinkler,
        };
    }
    let query = args.text.join(" ");
    debug!(query = %query, scorer = %options.scorer, "running suggest");
    let matches = Suggester::new(book).with_options(options).suggest(&query);
    SuggestReport::new(query, options, matches)
}

pub fn run_lookup(book: &CodeBook, args: &LookupArgs) -> LookupReport {
    LookupReport::build(book, &args.code)
}

pub fn run_stats(book: &CodeBook) -> StatsReport {
    StatsReport::build(book)
}
