//! Export command implementation
//!
//! This module implements the `export` command, which compiles a canonical
//! save file into MAL XML documents.

use crate::adapters::savefile::SaveFile;
use crate::config::{load_config, load_config_from_str, MalxportConfig};
use crate::core::compile::UnmappedPolicy;
use crate::core::export::{BatchExporter, CompiledBatch, UserIdentity};
use crate::domain::entry::{CanonicalEntry, KindGroup};
use crate::domain::errors::CompileError;
use crate::domain::result::CompileResult;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Canonical save file to export (.json, .yaml or .yml)
    pub input: PathBuf,

    /// Compile anime and manga entries into separate documents
    #[arg(long)]
    pub split: bool,

    /// Dry run mode - compile and report without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the output file name (without extension)
    #[arg(long)]
    pub file_stem: Option<String>,

    /// User id written into the header
    #[arg(long)]
    pub user_id: Option<u64>,

    /// User name written into the header
    #[arg(long)]
    pub user_name: Option<String>,

    /// Write entries without a MyAnimeList id as comments
    #[arg(long)]
    pub comment_unmapped: bool,

    /// Tell importers not to overwrite entries already on the list
    #[arg(long)]
    pub no_update_on_import: bool,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting export command");

        let mut config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let save = match SaveFile::load(&self.input).await {
            Ok(s) => s,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to read save file");
                eprintln!("Failed to read {}: {e}", self.input.display());
                return Ok(5); // Fatal error exit code
            }
        };

        let exporter = BatchExporter::new(config.export.compile_options())
            .with_user(self.resolve_user(&config, &save));

        let dry_run = self.dry_run || config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        println!("🚀 Compiling {} entries...", save.data.len());

        let batches = if self.split {
            compile_split(&exporter, &save).await?
        } else {
            let entries = save.data;
            let single = tokio::task::spawn_blocking(move || exporter.export(&entries)).await?;
            vec![(None, single)]
        };

        let mut compiled = Vec::with_capacity(batches.len());
        for (split, result) in batches {
            match result {
                Ok(batch) => compiled.push((split, batch)),
                Err(e) => {
                    println!("❌ Export rejected: {e}");
                    if self.split {
                        if let Some(group) = split {
                            println!("   While compiling the {group} entries");
                        }
                    }
                    return Ok(3); // Compile rejected exit code
                }
            }
        }

        if compiled.is_empty() {
            println!("❌ Export rejected: nothing to export");
            return Ok(3);
        }

        let targets: Vec<(PathBuf, &CompiledBatch)> = compiled
            .iter()
            .map(|(split, batch)| (config.export.output_path(*split), batch))
            .collect();

        if !dry_run {
            // Nothing is written unless every target can be
            if let Err(e) = check_targets(targets.iter().map(|(path, _)| path.as_path()), self.force) {
                tracing::error!(error = %e, "Refusing to write export");
                println!("❌ {e}");
                return Ok(5);
            }
        }

        for (path, batch) in &targets {
            batch.summary.log_summary();

            if !dry_run {
                if let Err(e) = write_output(path, &batch.document, self.force).await {
                    tracing::error!(error = %e, path = %path.display(), "Failed to write output");
                    println!("❌ {e}");
                    return Ok(5);
                }
            }

            print_summary(path, batch, dry_run);
        }

        println!("✅ Export completed successfully!");
        Ok(0)
    }

    fn apply_overrides(&self, config: &mut MalxportConfig) {
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(stem) = &self.file_stem {
            config.export.file_stem = stem.clone();
        }
        if self.user_id.is_some() {
            config.export.user_id = self.user_id;
        }
        if let Some(name) = &self.user_name {
            config.export.user_name = Some(name.clone());
        }
        if self.comment_unmapped {
            config.export.unmapped_entries = UnmappedPolicy::Comment;
        }
        if self.no_update_on_import {
            config.export.update_on_import = false;
        }
    }

    /// Identity fields fall back from configuration to the save file header
    fn resolve_user(&self, config: &MalxportConfig, save: &SaveFile) -> UserIdentity {
        let configured = config.export.user_identity();
        let recorded = save.user_identity();
        UserIdentity {
            user_id: configured.user_id.or(recorded.user_id),
            user_name: configured.user_name.or(recorded.user_name),
        }
    }
}

type SplitResult = (Option<KindGroup>, CompileResult<CompiledBatch>);

/// Compiles the video and text groups as independent batches, concurrently
async fn compile_split(exporter: &BatchExporter, save: &SaveFile) -> anyhow::Result<Vec<SplitResult>> {
    let grouped = save.split_by_group();

    // Splitting only separates the two exportable groups; any other kind
    // rejects the export like it does without --split
    if let Some(entry) = grouped.unsupported.first() {
        let error = CompileError::UnsupportedKind {
            kind: entry.media_kind,
        };
        crate::log_batch_rejected!(save.data.len(), &error);
        return Ok(vec![(None, Err(error))]);
    }

    let mut handles = Vec::new();
    for (group, entries) in [
        (KindGroup::Video, grouped.video),
        (KindGroup::Text, grouped.text),
    ] {
        if entries.is_empty() {
            continue;
        }
        let exporter = exporter.clone();
        let handle = tokio::task::spawn_blocking(move || compile_group(&exporter, &entries));
        handles.push((group, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (group, handle) in handles {
        results.push((Some(group), handle.await?));
    }
    Ok(results)
}

fn compile_group(exporter: &BatchExporter, entries: &[CanonicalEntry]) -> CompileResult<CompiledBatch> {
    exporter.export(entries)
}

/// Loads the configuration file, or defaults when it does not exist
fn load_or_default(config_path: &str) -> crate::domain::Result<MalxportConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(config_path = %config_path, "No configuration file found, using defaults");
        load_config_from_str("")
    }
}

/// Fails if any target already exists and overwriting was not requested
fn check_targets<'a>(paths: impl IntoIterator<Item = &'a Path>, force: bool) -> anyhow::Result<()> {
    if force {
        return Ok(());
    }
    let existing: Vec<String> = paths
        .into_iter()
        .filter(|p| p.exists())
        .map(|p| p.display().to_string())
        .collect();
    if !existing.is_empty() {
        anyhow::bail!(
            "Output file already exists: {} (use --force to overwrite)",
            existing.join(", ")
        );
    }
    Ok(())
}

async fn write_output(path: &Path, document: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Output file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, document).await?;
    tracing::info!(path = %path.display(), bytes = document.len(), "Wrote export");
    Ok(())
}

fn print_summary(path: &Path, batch: &CompiledBatch, dry_run: bool) {
    let summary = &batch.summary;
    println!();
    println!("📊 Export Summary ({}):", summary.group);
    if dry_run {
        println!("  Output: {} (not written)", path.display());
    } else {
        println!("  Output: {}", path.display());
    }
    println!("  Records: {}", summary.records);
    println!("  Without MAL id: {}", summary.unmapped);
    println!("  Current: {}", summary.counts.current);
    println!("  Completed: {}", summary.counts.completed_with_repeats());
    println!("  On hold: {}", summary.counts.on_hold);
    println!("  Dropped: {}", summary.counts.dropped);
    println!("  Planned: {}", summary.counts.planned);
    println!("  SHA-256: {}", summary.checksum);
    println!("  Duration: {:.3}s", summary.duration.as_secs_f64());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn save_file(entries: serde_json::Value) -> SaveFile {
        serde_json::from_value(json!({
            "header": {"user_details": {"id": 5, "name": "from-header"}},
            "data": entries
        }))
        .unwrap()
    }

    #[test]
    fn test_overrides_apply() {
        let args = ExportArgs {
            output_dir: Some("out".to_string()),
            file_stem: Some("list".to_string()),
            user_id: Some(11),
            comment_unmapped: true,
            no_update_on_import: true,
            ..ExportArgs::default()
        };
        let mut config = MalxportConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.export.output_dir, "out");
        assert_eq!(config.export.file_stem, "list");
        assert_eq!(config.export.user_id, Some(11));
        assert_eq!(config.export.unmapped_entries, UnmappedPolicy::Comment);
        assert!(!config.export.update_on_import);
    }

    #[test]
    fn test_user_falls_back_to_save_header() {
        let args = ExportArgs::default();
        let mut config = MalxportConfig::default();
        config.export.user_name = Some("configured".to_string());

        let user = args.resolve_user(&config, &save_file(json!([])));
        assert_eq!(user.user_id, Some(5));
        assert_eq!(user.user_name.as_deref(), Some("configured"));
    }

    #[tokio::test]
    async fn test_compile_split_separates_groups() {
        let save = save_file(json!([
            {"id": {"value": "1"}, "type": "animation", "status": "current"},
            {"id": {"value": "2"}, "type": "comic", "status": "current"},
            {"id": {"value": "3"}, "type": "book", "status": "planned"}
        ]));

        let results = compile_split(&BatchExporter::default(), &save).await.unwrap();
        assert_eq!(results.len(), 2);

        let (group, video) = &results[0];
        assert_eq!(*group, Some(KindGroup::Video));
        assert_eq!(video.as_ref().unwrap().summary.records, 1);

        let (group, text) = &results[1];
        assert_eq!(*group, Some(KindGroup::Text));
        assert_eq!(text.as_ref().unwrap().summary.records, 2);
    }

    #[tokio::test]
    async fn test_compile_split_rejects_unsupported_kinds() {
        let save = save_file(json!([
            {"id": {"value": "1"}, "type": "animation", "status": "current"},
            {"id": {"value": "4"}, "type": "podcast", "status": "current"},
            {"id": {"value": "5"}, "type": "game", "status": "planned"}
        ]));

        let results = compile_split(&BatchExporter::default(), &save).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].1.as_ref().unwrap_err(),
            &CompileError::UnsupportedKind {
                kind: crate::domain::entry::MediaKind::Podcast
            }
        );
    }

    #[test]
    fn test_check_targets_lists_existing_files() {
        let dir = TempDir::new().unwrap();
        let anime = dir.path().join("malxml-anime.xml");
        let manga = dir.path().join("malxml-manga.xml");
        std::fs::write(&manga, "old").unwrap();

        let err = check_targets([anime.as_path(), manga.as_path()], false).unwrap_err();
        assert!(err.to_string().contains("malxml-manga.xml"));
        assert!(!err.to_string().contains("malxml-anime.xml"));
        assert!(check_targets([anime.as_path(), manga.as_path()], true).is_ok());
        assert!(check_targets([anime.as_path()], false).is_ok());
    }

    #[tokio::test]
    async fn test_write_output_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("malxml.xml");

        write_output(&path, "<a></a>", false).await.unwrap();
        assert!(write_output(&path, "<b></b>", false).await.is_err());
        write_output(&path, "<b></b>", true).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<b></b>");
    }
}
