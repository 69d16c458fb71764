use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// The whole catalog document. Only `apps` is interpreted; every other
/// top-level key is carried through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    root: Map<String, Value>,
}

impl Catalog {
    pub fn apps(&self) -> &[Value] {
        self.root
            .get("apps")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn apps_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.root.get_mut("apps").and_then(Value::as_array_mut)
    }

    /// Appends an entry, creating `apps` if the catalog has none yet.
    pub fn push_app(&mut self, entry: Value) {
        match self.root.get_mut("apps").and_then(Value::as_array_mut) {
            Some(apps) => apps.push(entry),
            None => {
                self.root
                    .insert("apps".to_string(), Value::Array(vec![entry]));
            }
        }
    }
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let file = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&file)
        .with_context(|| format!("invalid json in {}", path.display()))?;
    if let Some(apps) = catalog.root.get("apps") {
        if !apps.is_array() {
            bail!("`apps` in {} is not an array", path.display());
        }
    }
    tracing::info!(path = %path.display(), apps = catalog.apps().len(), "loaded catalog");
    Ok(catalog)
}

pub fn save_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();
    let mut f =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(f, "{}", serde_json::to_string_pretty(catalog)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), apps = catalog.apps().len(), "saved catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_catalog;
    use serde_json::json;

    #[test]
    fn round_trips_unknown_fields_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(
            &path,
            r#"{"name":"My Repo","identifier":"com.repo","apps":[{"bundleIdentifier":"a","custom":1}],"news":[]}"#,
        );

        let catalog = load_catalog(&path).unwrap();
        save_catalog(&path, &catalog).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let keys: Vec<_> = ["\"name\"", "\"identifier\"", "\"apps\"", "\"news\""]
            .iter()
            .map(|key| raw.find(key).expect("key present"))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{raw}");

        let reloaded = load_catalog(&path).unwrap();
        assert_eq!(reloaded, catalog);
        assert_eq!(reloaded.apps()[0]["custom"], json!(1));
    }

    #[test]
    fn keeps_numbers_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(
            &path,
            r#"{"apps":[],"build":123456789012345678901234567890,"ratio":0.1000000000000000055511151231257827}"#,
        );

        let catalog = load_catalog(&path).unwrap();
        save_catalog(&path, &catalog).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"build\": 123456789012345678901234567890"), "{raw}");
        assert!(raw.contains("\"ratio\": 0.1000000000000000055511151231257827"), "{raw}");
    }

    #[test]
    fn writes_two_space_indent_and_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(&path, r#"{"apps":[]}"#);

        let catalog = load_catalog(&path).unwrap();
        save_catalog(&path, &catalog).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"apps\": []\n}\n");
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path().join("repo.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(&path, "{\"apps\": [");

        let err = load_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("invalid json"));
    }

    #[test]
    fn non_object_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(&path, "[]");

        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn non_array_apps_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        write_catalog(&path, r#"{"apps":{}}"#);

        let err = load_catalog(&path).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn push_app_creates_missing_apps() {
        let mut catalog: Catalog = serde_json::from_value(json!({"name": "Repo"})).unwrap();
        assert!(catalog.apps().is_empty());
        assert!(catalog.apps_mut().is_none());

        catalog.push_app(json!({"bundleIdentifier": "a"}));
        catalog.push_app(json!({"bundleIdentifier": "b"}));

        assert_eq!(
            serde_json::to_value(&catalog).unwrap(),
            json!({"name": "Repo", "apps": [{"bundleIdentifier": "a"}, {"bundleIdentifier": "b"}]})
        );
    }
}
