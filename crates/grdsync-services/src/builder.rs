use grdsync_core::{FileSystem, GrdSyncError, MappingTable, ResourcePath, Result};
use grdsync_parsers::read_part_files;
use std::collections::BTreeSet;

/// Map a root document and every part reachable from it.
///
/// Parts are inserted before the document that declares them, recursively,
/// so the resulting table lists dependencies first. Part filenames in
/// `exclude` are skipped together with whatever they would include. The first
/// unreadable document aborts the whole build.
pub fn build_family(
    fs: &dyn FileSystem,
    upstream: &ResourcePath,
    downstream: &ResourcePath,
    exclude: &BTreeSet<String>,
) -> Result<MappingTable> {
    let mut ancestors = Vec::new();
    let table = visit(fs, upstream, downstream, exclude, &mut ancestors)?;
    tracing::debug!(
        event = "grd_family_built",
        root = %upstream,
        parts = table.len().saturating_sub(1)
    );
    Ok(table)
}

fn visit(
    fs: &dyn FileSystem,
    upstream: &ResourcePath,
    downstream: &ResourcePath,
    exclude: &BTreeSet<String>,
    ancestors: &mut Vec<ResourcePath>,
) -> Result<MappingTable> {
    tracing::trace!(event = "grd_visit", path = %upstream, depth = ancestors.len());
    let parts = read_part_files(fs, upstream.as_path())?;

    ancestors.push(upstream.clone());
    let mut table = MappingTable::new();
    for part in &parts {
        if exclude.contains(part) {
            tracing::trace!(event = "grd_part_excluded", parent = %upstream, part = %part);
            continue;
        }
        let up = upstream.sibling(part);
        if ancestors.contains(&up) {
            let chain = ancestors
                .iter()
                .chain(std::iter::once(&up))
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(GrdSyncError::Cycle {
                path: up.into_path_buf(),
                chain,
            });
        }
        let down = downstream.sibling(part);
        let sub = visit(fs, &up, &down, exclude, ancestors)?;
        table.merge(sub)?;
    }
    ancestors.pop();

    table.insert(upstream.clone(), downstream.clone())?;
    Ok(table)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use grdsync_core::StdFs;
    use std::fs;
    use std::path::Path;

    fn grd(parts: &[&str]) -> String {
        let body: String = parts
            .iter()
            .map(|p| format!("    <part file=\"{p}\" />\n"))
            .collect();
        format!("<grit>\n  <messages>\n{body}  </messages>\n</grit>\n")
    }

    fn write(dir: &Path, rel: &str, parts: &[&str]) {
        let p = dir.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, grd(parts)).unwrap();
    }

    fn rp(p: impl AsRef<Path>) -> ResourcePath {
        ResourcePath::new(p).unwrap()
    }

    fn names(t: &MappingTable) -> Vec<String> {
        t.upstream_paths()
            .map(|p| p.file_name().unwrap().to_string())
            .collect()
    }

    #[test]
    fn parts_precede_parents_and_exclusions_are_dropped() {
        let up = tempfile::tempdir().unwrap();
        let down = tempfile::tempdir().unwrap();
        write(up.path(), "a.grd", &["b.grdp", "c.grdp"]);
        write(up.path(), "b.grdp", &["d.grdp"]);
        write(up.path(), "d.grdp", &[]);
        // c.grdp deliberately missing: excluded parts are never read

        let exclude = BTreeSet::from(["c.grdp".to_string()]);
        let t = build_family(
            &StdFs,
            &rp(up.path().join("a.grd")),
            &rp(down.path().join("a.grd")),
            &exclude,
        )
        .unwrap();

        assert_eq!(names(&t), vec!["d.grdp", "b.grdp", "a.grd"]);
        assert_eq!(
            t.get(&rp(up.path().join("d.grdp"))),
            Some(&rp(down.path().join("d.grdp")))
        );
    }

    #[test]
    fn leaf_document_yields_single_entry() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "leaf.grd", &[]);
        let t = build_family(
            &StdFs,
            &rp(up.path().join("leaf.grd")),
            &rp("/downstream/leaf.grd"),
            &BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn exclusion_applies_at_every_depth() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "root.grd", &["mid.grdp", "os.grdp"]);
        write(up.path(), "mid.grdp", &["os.grdp", "keep.grdp"]);
        write(up.path(), "keep.grdp", &[]);

        let exclude = BTreeSet::from(["os.grdp".to_string()]);
        let t = build_family(
            &StdFs,
            &rp(up.path().join("root.grd")),
            &rp("/down/root.grd"),
            &exclude,
        )
        .unwrap();
        assert!(t.upstream_paths().all(|p| p.file_name() != Some("os.grdp")));
        assert_eq!(names(&t), vec!["keep.grdp", "mid.grdp", "root.grd"]);
    }

    #[test]
    fn shared_part_is_listed_once_at_first_use() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "root.grd", &["x.grdp", "y.grdp"]);
        write(up.path(), "x.grdp", &["shared.grdp"]);
        write(up.path(), "y.grdp", &["shared.grdp"]);
        write(up.path(), "shared.grdp", &[]);

        let t = build_family(
            &StdFs,
            &rp(up.path().join("root.grd")),
            &rp("/down/root.grd"),
            &BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(names(&t), vec!["shared.grdp", "x.grdp", "y.grdp", "root.grd"]);
    }

    #[test]
    fn missing_part_fails_the_whole_build() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "root.grd", &["ok.grdp", "gone.grdp"]);
        write(up.path(), "ok.grdp", &[]);

        let err = build_family(
            &StdFs,
            &rp(up.path().join("root.grd")),
            &rp("/down/root.grd"),
            &BTreeSet::new(),
        )
        .unwrap_err();
        match err {
            GrdSyncError::NotFound { path } => assert!(path.ends_with("gone.grdp")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cycles_are_rejected() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "root.grd", &["a.grdp"]);
        write(up.path(), "a.grdp", &["b.grdp"]);
        write(up.path(), "b.grdp", &["a.grdp"]);

        let err = build_family(
            &StdFs,
            &rp(up.path().join("root.grd")),
            &rp("/down/root.grd"),
            &BTreeSet::new(),
        )
        .unwrap_err();
        match err {
            GrdSyncError::Cycle { path, chain } => {
                assert!(path.ends_with("a.grdp"));
                assert!(chain.contains("b.grdp"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parts_in_subdirectories_keep_their_relative_layout() {
        let up = tempfile::tempdir().unwrap();
        write(up.path(), "app/root.grd", &["settings/s.grdp"]);
        write(up.path(), "app/settings/s.grdp", &[]);

        let down_root = rp("/down/app/root.grd");
        let t = build_family(
            &StdFs,
            &rp(up.path().join("app/root.grd")),
            &down_root,
            &BTreeSet::new(),
        )
        .unwrap();
        let first = &t.as_slice()[0];
        assert_eq!(first.downstream, down_root.sibling("settings/s.grdp"));
    }
}
