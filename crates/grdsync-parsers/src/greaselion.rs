use grdsync_core::{FileSystem, GrdSyncError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the site-specific scripts checkout lives relative to the tool when
/// no extension path is given.
pub const DEFAULT_GREASELION_BASE: &str = "../../../brave-site-specific-scripts";

const RULES_FILE: &str = "Greaselion.json";

#[derive(Debug, Deserialize)]
struct GreaselionRule {
    #[serde(default)]
    messages: Option<String>,
}

/// Parse `Greaselion.json` content and return the source-locale
/// `messages.json` of every rule that ships user-visible strings.
///
/// Empty content or a top-level `null` yields no paths (logged as a warning);
/// anything else that is not a rule array is a [`GrdSyncError::Json`].
pub fn parse_greaselion_rules(json: &str, base: &Path, path: &Path) -> Result<Vec<PathBuf>> {
    if json.trim().is_empty() {
        tracing::warn!(event = "greaselion_empty", path = %path.display());
        return Ok(Vec::new());
    }
    let rules: Option<Vec<GreaselionRule>> =
        serde_json::from_str(json).map_err(|e| GrdSyncError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let Some(rules) = rules else {
        tracing::warn!(event = "greaselion_null", path = %path.display());
        return Ok(Vec::new());
    };
    Ok(rules
        .into_iter()
        .filter_map(|r| r.messages)
        .map(|m| base.join(m).join("en_US").join("messages.json"))
        .collect())
}

/// Read `<base>/Greaselion.json` and collect its messages files.
pub fn read_greaselion_message_paths(fs: &dyn FileSystem, base: &Path) -> Result<Vec<PathBuf>> {
    let path = base.join(RULES_FILE);
    if !fs.exists(&path) {
        return Err(GrdSyncError::NotFound { path });
    }
    let json = fs
        .read_to_string(&path)
        .map_err(|e| GrdSyncError::io(&path, e))?;
    parse_greaselion_rules(&json, base, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grdsync_core::StdFs;

    #[test]
    fn only_rules_with_messages_contribute() {
        let json = r#"[
            {"urls": ["https://a.example/*"], "scripts": ["a.js"], "messages": "scripts/a/_locales"},
            {"urls": ["https://b.example/*"], "scripts": ["b.js"]},
            {"messages": "scripts/c/_locales", "preconditions": {"rewards-enabled": true}}
        ]"#;
        let base = Path::new("/ext");
        let got = parse_greaselion_rules(json, base, &base.join(RULES_FILE)).unwrap();
        assert_eq!(
            got,
            vec![
                PathBuf::from("/ext/scripts/a/_locales/en_US/messages.json"),
                PathBuf::from("/ext/scripts/c/_locales/en_US/messages.json"),
            ]
        );
    }

    #[test]
    fn empty_or_null_rules_yield_nothing() {
        let p = Path::new("Greaselion.json");
        assert!(parse_greaselion_rules("", Path::new("."), p).unwrap().is_empty());
        assert!(parse_greaselion_rules("null", Path::new("."), p).unwrap().is_empty());
    }

    #[test]
    fn malformed_rules_are_reported_with_path() {
        let err = parse_greaselion_rules("{not json", Path::new("."), Path::new("G.json")).unwrap_err();
        assert!(matches!(err, GrdSyncError::Json { .. }));
        assert!(err.to_string().contains("G.json"));
    }

    #[test]
    fn reads_rules_file_from_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RULES_FILE), r#"[{"messages": "m"}]"#).unwrap();
        let got = read_greaselion_message_paths(&StdFs, dir.path()).unwrap();
        assert_eq!(got, vec![dir.path().join("m").join("en_US").join("messages.json")]);

        let missing = tempfile::tempdir().unwrap();
        let err = read_greaselion_message_paths(&StdFs, missing.path()).unwrap_err();
        assert!(matches!(err, GrdSyncError::NotFound { .. }));
    }
}
