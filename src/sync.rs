use crate::catalog::{load_catalog, save_catalog};
use crate::cli::Args;
use crate::extractor::read_archive_info;
use crate::merge::merge_entry;
use crate::model::{SyncAction, SyncRecord};
use crate::scanner::find_archives;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Loads the catalog, folds every archive into it and writes it back once.
///
/// Archives without a payload Info.plist are always skipped. Corrupt
/// containers and malformed plists are skipped too unless `--strict` is set,
/// in which case the run stops before the catalog is touched.
pub fn run(args: &Args) -> Result<Vec<SyncRecord>> {
    println!("Loading catalog {}", args.catalog.display());
    let mut catalog = load_catalog(&args.catalog)?;
    let archives = find_archives(&args.ipa_dir, &args.extension)?;

    let pb = ProgressBar::new(archives.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len} {msg}")?);

    let mut records = Vec::with_capacity(archives.len());
    for path in &archives {
        let archive = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(archive.clone());
        pb.suspend(|| println!("\nProcessing {archive}"));

        let record = match read_archive_info(path) {
            Ok(Some(info)) => {
                let action = merge_entry(&mut catalog, &info)?;
                match action {
                    SyncAction::Updated => pb.suspend(|| {
                        println!("Overwriting existing entry for {}", info.bundle_identifier)
                    }),
                    _ => pb.suspend(|| {
                        println!("Adding new entry for {}", info.bundle_identifier)
                    }),
                }
                SyncRecord::merged(archive, action, &info)
            }
            Ok(None) => {
                tracing::info!(archive = %path.display(), "no payload Info.plist");
                pb.suspend(|| println!("Skipped: Info.plist not found in archive"));
                SyncRecord::skipped(archive, "Info.plist not found")
            }
            Err(err) if !args.strict => {
                tracing::info!(archive = %path.display(), error = %err, "skipping unreadable archive");
                pb.suspend(|| println!("Skipped: {err}"));
                SyncRecord::skipped(archive, err.to_string())
            }
            Err(err) => {
                pb.abandon();
                return Err(err).with_context(|| format!("failed to extract {}", path.display()));
            }
        };
        records.push(record);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.dry_run {
        println!("\nDry run: {} left unchanged", args.catalog.display());
    } else {
        println!("\nSaving catalog {}", args.catalog.display());
        save_catalog(&args.catalog, &catalog)?;
    }
    Ok(records)
}
