use crate::catalog::Catalog;
use crate::model::{
    AppEntry, DEFAULT_DEVELOPER_NAME, DEFAULT_TINT_COLOR, ExistingEntry, ExtractedInfo,
    SyncAction,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// Builds a full entry from archive metadata, carrying over every curated
/// field from `existing` that the archive cannot supply.
pub fn build_app_entry(info: &ExtractedInfo, existing: Option<&ExistingEntry>) -> AppEntry {
    let fallback = ExistingEntry::default();
    let existing = existing.unwrap_or(&fallback);
    let preserved = |field: &Option<String>| field.clone().unwrap_or_default();

    AppEntry {
        beta: existing.beta.unwrap_or(false),
        name: first_non_empty([Some(info.name.as_str()), existing.name.as_deref()]),
        bundle_identifier: info.bundle_identifier.clone(),
        version: info.version.clone(),
        size: info.size,
        subtitle: first_non_empty([
            Some(info.display_name.as_str()),
            existing.subtitle.as_deref(),
            existing.display_name.as_deref(),
        ]),
        developer_name: existing
            .developer_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DEVELOPER_NAME.to_string()),
        version_date: preserved(&existing.version_date),
        version_description: preserved(&existing.version_description),
        download_url: preserved(&existing.download_url),
        localized_description: preserved(&existing.localized_description),
        icon_url: preserved(&existing.icon_url),
        tint_color: existing
            .tint_color
            .clone()
            .unwrap_or_else(|| DEFAULT_TINT_COLOR.to_string()),
        screenshot_urls: existing.screenshot_urls.clone().unwrap_or_default(),
    }
}

fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn bundle_identifier_of(app: &Value) -> Option<&str> {
    app.get("bundleIdentifier").and_then(Value::as_str)
}

/// Merges one archive into the catalog.
///
/// Every entry with the same bundle identifier is rebuilt in place. With no
/// match a fresh entry is appended.
pub fn merge_entry(catalog: &mut Catalog, info: &ExtractedInfo) -> Result<SyncAction> {
    let mut updated = false;
    if let Some(apps) = catalog.apps_mut() {
        for slot in apps.iter_mut() {
            if bundle_identifier_of(slot) != Some(info.bundle_identifier.as_str()) {
                continue;
            }
            let existing = ExistingEntry::deserialize(&*slot).with_context(|| {
                format!("malformed catalog entry for {}", info.bundle_identifier)
            })?;
            *slot = serde_json::to_value(build_app_entry(info, Some(&existing)))?;
            updated = true;
        }
    }
    if updated {
        return Ok(SyncAction::Updated);
    }

    catalog.push_app(serde_json::to_value(build_app_entry(info, None))?);
    Ok(SyncAction::Added)
}
