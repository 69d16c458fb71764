use crate::model::ExtractedInfo;
use regex::Regex;
use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Payload-root Info.plist: `Payload/*Info.plist`.
static INFO_PLIST_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Payload/.*Info\.plist$").expect("valid member pattern"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable zip container: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("malformed property list {member}: {source}")]
    Plist {
        member: String,
        #[source]
        source: plist::Error,
    },

    #[error("property list {member} is not a dictionary")]
    NotADictionary { member: String },
}

/// Reads bundle metadata out of an app archive.
///
/// Returns `Ok(None)` when the archive has no payload Info.plist. The
/// reported size is the archive's size on disk.
pub fn read_archive_info(path: &Path) -> Result<Option<ExtractedInfo>, ExtractError> {
    let size = fs::metadata(path)?.len();
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let Some(member) = archive
        .file_names()
        .find(|name| INFO_PLIST_MEMBER.is_match(name))
        .map(str::to_owned)
    else {
        return Ok(None);
    };
    tracing::debug!(archive = %path.display(), %member, "found payload Info.plist");

    let mut bytes = Vec::new();
    archive.by_name(&member)?.read_to_end(&mut bytes)?;
    parse_info_plist(&bytes, &member, size).map(Some)
}

fn parse_info_plist(bytes: &[u8], member: &str, size: u64) -> Result<ExtractedInfo, ExtractError> {
    let value = plist::Value::from_reader(Cursor::new(bytes)).map_err(|source| {
        ExtractError::Plist {
            member: member.to_owned(),
            source,
        }
    })?;
    let dict = value
        .as_dictionary()
        .ok_or_else(|| ExtractError::NotADictionary {
            member: member.to_owned(),
        })?;
    let string_key = |key: &str| {
        dict.get(key)
            .and_then(plist::Value::as_string)
            .unwrap_or_default()
            .to_owned()
    };

    Ok(ExtractedInfo {
        bundle_identifier: string_key("CFBundleIdentifier"),
        version: string_key("CFBundleShortVersionString"),
        name: string_key("CFBundleName"),
        display_name: string_key("CFBundleDisplayName"),
        size,
    })
}
