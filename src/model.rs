use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_DEVELOPER_NAME: &str = "UNKNOWN";
pub const DEFAULT_TINT_COLOR: &str = "03befc";

/// A complete catalog entry as written back to `apps`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub beta: bool,
    pub name: String,
    pub bundle_identifier: String,
    pub version: String,
    pub size: u64,
    pub subtitle: String,
    pub developer_name: String,
    pub version_date: String,
    pub version_description: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub localized_description: String,
    #[serde(rename = "iconURL")]
    pub icon_url: String,
    pub tint_color: String,
    #[serde(rename = "screenshotURLs")]
    pub screenshot_urls: Vec<String>,
}

/// The curated fields of an entry already in the catalog. Anything missing,
/// null or of an unexpected type falls back to the defaults applied by the
/// merger.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExistingEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub beta: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    /// Older catalogs stored the subtitle under this key.
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub developer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version_description: Option<String>,
    #[serde(rename = "downloadURL", default, deserialize_with = "lenient")]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localized_description: Option<String>,
    #[serde(rename = "iconURL", default, deserialize_with = "lenient")]
    pub icon_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tint_color: Option<String>,
    #[serde(rename = "screenshotURLs", default, deserialize_with = "lenient")]
    pub screenshot_urls: Option<Vec<String>>,
}

/// Reads a curated field, treating a value of the wrong JSON type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!(%value, error = %err, "ignoring curated field of unexpected type");
            Ok(None)
        }
    }
}

/// Bundle metadata read out of a single archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedInfo {
    pub bundle_identifier: String,
    pub version: String,
    pub name: String,
    pub display_name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Added,
    Updated,
    Skipped,
}

/// One line of the sync report.
#[derive(Debug, Serialize, Clone)]
pub struct SyncRecord {
    pub archive: String,
    pub action: SyncAction,
    pub bundle_identifier: Option<String>,
    pub version: Option<String>,
    pub size: Option<u64>,
    pub reason: Option<String>,
}

impl SyncRecord {
    pub fn merged(archive: String, action: SyncAction, info: &ExtractedInfo) -> Self {
        Self {
            archive,
            action,
            bundle_identifier: Some(info.bundle_identifier.clone()),
            version: Some(info.version.clone()),
            size: Some(info.size),
            reason: None,
        }
    }

    pub fn skipped(archive: String, reason: impl Into<String>) -> Self {
        Self {
            archive,
            action: SyncAction::Skipped,
            bundle_identifier: None,
            version: None,
            size: None,
            reason: Some(reason.into()),
        }
    }
}
