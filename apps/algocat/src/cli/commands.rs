//! # CLI Command Implementations
//!
//! Every command loads the catalog fresh from the configured path.

use crate::api::{self, AlgorithmSummary, AppState, StatusResponse};
use crate::config::Config;
use algocat_core::{
    CatalogError, CatalogFilter, CatalogLoader, LoadOutcome, LoadReport, Pagination, blake3_hash,
    canonical_checksum, export_canonical,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

// =============================================================================
// CATALOG LOADING
// =============================================================================

/// Load the configured catalog and log its load report.
pub fn load_catalog(config: &Config) -> Result<LoadOutcome, CatalogError> {
    let path = &config.catalog.path;
    tracing::debug!(path = %path.display(), "Loading catalog");
    let outcome = CatalogLoader::load_file(path)?;
    log_report(&outcome.report);
    Ok(outcome)
}

/// One `warn!` per rejected record, one `debug!` per warning, one `info!` summary.
pub fn log_report(report: &LoadReport) {
    for rejected in &report.rejected {
        for error in &rejected.errors {
            tracing::warn!(
                index = rejected.index,
                id = rejected.id.as_deref().unwrap_or("<missing>"),
                error = %error,
                "Record rejected"
            );
        }
    }
    for warning in &report.warnings {
        tracing::debug!(id = %warning.id, warning = %warning.warning, "Data quality warning");
    }
    tracing::info!(
        total = report.total,
        accepted = report.accepted,
        rejected = report.rejected.len(),
        warnings = report.warnings.len(),
        links_removed = report.normalization.links_removed,
        fixtures_renamed = report.normalization.fixtures_renamed,
        "Catalog loaded"
    );
}

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, CatalogError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        CatalogError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(CatalogError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| CatalogError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Load the catalog and serve it over HTTP.
pub async fn cmd_serve(config: &Config) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(outcome, config.security.clone());
    api::run_server(&addr, state).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

pub fn cmd_status(config: &Config, json_mode: bool) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let status = StatusResponse::new(
        outcome.store.stats(),
        outcome.report.rejected.len(),
        outcome.report.warnings.len(),
    );

    if json_mode {
        print_json(&status);
        return Ok(());
    }

    println!("Algorithm Catalog Status");
    println!("========================");
    println!("Catalog:         {}", config.catalog.path.display());
    println!();
    println!("Records:         {}", status.record_count);
    println!("Categories:      {}", status.category_count);
    println!("Fixtures:        {}", status.fixture_count);
    println!("Implementations: {}", status.implementation_count);
    println!("Rejected:        {}", status.rejected_count);
    println!("Warnings:        {}", status.warning_count);
    println!();
    println!("By difficulty:");
    for (difficulty, count) in &status.by_difficulty {
        println!("  {:<15} {}", difficulty, count);
    }
    println!("By list:");
    for (list_type, count) in &status.by_list_type {
        println!("  {:<15} {}", list_type, count);
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Print the load report. Fails when any record was rejected.
pub fn cmd_validate(
    config: &Config,
    json_mode: bool,
    verbose: bool,
) -> Result<ExitCode, CatalogError> {
    let outcome = load_catalog(config)?;
    let report = &outcome.report;

    if json_mode {
        print_json(report);
    } else {
        println!(
            "{} records: {} accepted, {} rejected, {} warnings",
            report.total,
            report.accepted,
            report.rejected.len(),
            report.warnings.len()
        );
        for rejected in &report.rejected {
            println!(
                "  REJECTED #{} ({})",
                rejected.index,
                rejected.id.as_deref().unwrap_or("no id")
            );
            for error in &rejected.errors {
                println!("    - {}", error);
            }
        }
        if verbose {
            for warning in &report.warnings {
                println!("  WARNING {}: {}", warning.id, warning.warning);
            }
        }
    }

    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// =============================================================================
// READ COMMANDS
// =============================================================================

pub fn cmd_show(config: &Config, json_mode: bool, id: &str) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let record = outcome.store.get(id)?;

    if json_mode {
        print_json(record);
        return Ok(());
    }

    println!("{} ({})", record.title, record.id);
    println!("  Category:    {}", record.category);
    println!("  Difficulty:  {}", record.difficulty);
    println!("  List:        {}", record.list_type);
    let languages: Vec<&str> = record.languages().iter().map(|l| l.as_str()).collect();
    println!("  Languages:   {}", languages.join(", "));
    println!("  Fixtures:    {}", record.test_cases.len());
    if !record.company_tags.is_empty() {
        println!("  Companies:   {}", record.company_tags.join(", "));
    }
    if !record.explanation.problem_statement.is_empty() {
        println!();
        println!("{}", record.explanation.problem_statement);
    }

    Ok(())
}

pub fn cmd_query(
    config: &Config,
    json_mode: bool,
    filter: &CatalogFilter,
    page: Pagination,
) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let result = outcome.store.query(filter, page);
    let items: Vec<AlgorithmSummary> = result
        .records
        .iter()
        .map(|r| AlgorithmSummary::from(*r))
        .collect();

    if json_mode {
        print_json(&serde_json::json!({
            "total": result.total,
            "offset": result.offset,
            "limit": result.limit,
            "items": items,
        }));
        return Ok(());
    }

    println!(
        "{} match(es), showing {}..{}",
        result.total,
        result.offset,
        result.offset + items.len()
    );
    for item in &items {
        println!(
            "  {:<28} {:<13} {:<13} {}",
            item.id, item.difficulty, item.list_type, item.title
        );
    }

    Ok(())
}

/// Fixture bundles are always printed as JSON.
pub fn cmd_fixtures(config: &Config, id: &str) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let bundle = outcome.store.fixtures(id)?;
    print_json(&bundle);
    Ok(())
}

pub fn cmd_categories(config: &Config, json_mode: bool) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let categories = outcome.store.categories();

    if json_mode {
        print_json(&categories);
        return Ok(());
    }

    for entry in &categories {
        println!("  {:<28} {}", entry.category, entry.count);
    }
    Ok(())
}

// =============================================================================
// EXPORT & HASH COMMANDS
// =============================================================================

pub fn cmd_export(config: &Config, output: &Path) -> Result<(), CatalogError> {
    let safe_output = validate_output_path(output)?;
    let outcome = load_catalog(config)?;

    let data = export_canonical(&outcome.store)?;
    std::fs::write(&safe_output, &data).map_err(|e| CatalogError::Io(e.to_string()))?;

    tracing::info!(
        path = %safe_output.display(),
        records = outcome.store.len(),
        bytes = data.len(),
        "Canonical export written"
    );
    println!("Exported {} records to {:?}", outcome.store.len(), safe_output);
    println!("Checksum: {}", algocat_core::checksum_bytes(&data));

    Ok(())
}

pub fn cmd_hash(config: &Config, json_mode: bool) -> Result<(), CatalogError> {
    let outcome = load_catalog(config)?;
    let checksum = canonical_checksum(&outcome.store)?;
    let blake3 = blake3_hash(&outcome.store)?;

    if json_mode {
        print_json(&api::HashResponse {
            record_count: outcome.store.len(),
            checksum,
            blake3,
        });
        return Ok(());
    }

    println!("Records:  {}", outcome.store.len());
    println!("Checksum: {}", checksum);
    println!("BLAKE3:   {}", blake3);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    const CATALOG: &str = include_str!("../../../../data/catalog.json");

    fn config_for(dir: &tempfile::TempDir) -> Config {
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();
        let mut config = Config::default();
        config.catalog.path = path;
        config
    }

    #[test]
    fn load_catalog_reads_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load_catalog(&config_for(&dir)).unwrap();
        assert_eq!(outcome.store.len(), 10);
    }

    #[test]
    fn missing_catalog_is_an_io_error() {
        let mut config = Config::default();
        config.catalog.path = PathBuf::from("/nonexistent/catalog.json");
        assert!(matches!(load_catalog(&config), Err(CatalogError::Io(_))));
    }

    #[test]
    fn validate_fails_when_a_record_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        assert_eq!(
            cmd_validate(&config, true, false).unwrap(),
            ExitCode::SUCCESS
        );

        let mut raws: Vec<serde_json::Value> = serde_json::from_str(CATALOG).unwrap();
        raws.push(serde_json::json!({"id": "broken", "title": "Broken"}));
        std::fs::write(&config.catalog.path, serde_json::to_vec(&raws).unwrap()).unwrap();
        assert_eq!(
            cmd_validate(&config, true, false).unwrap(),
            ExitCode::FAILURE
        );
    }

    #[test]
    fn export_writes_importable_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        let output = dir.path().join("catalog.canonical.json");

        cmd_export(&config, &output).unwrap();

        let data = std::fs::read(&output).unwrap();
        let imported = algocat_core::import_canonical(&data).unwrap();
        assert_eq!(imported.store.len(), 10);
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        let output = dir.path().join("missing").join("out.json");
        assert!(matches!(
            cmd_export(&config, &output),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn show_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            cmd_show(&config_for(&dir), true, "bogo-sort"),
            Err(CatalogError::NotFound(_))
        ));
    }
}
