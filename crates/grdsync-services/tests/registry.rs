use fixture::*;

use grdsync_services::{MappingRegistry, ResourcePath, TOP_LEVEL_EXTS};

#[test]
fn forward_lists_renamed_pairs_then_families_parts_first() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let reg = default_registry(src);
    let fwd = reg.forward().expect("forward mapping");
    assert_eq!(
        file_names(fwd.upstream_paths()),
        vec![
            "settings_chromium_strings.grdp",
            "chromium_strings.grd",
            "components_chromium_strings.grd",
            "autofill_strings.grdp",
            "components_strings.grd",
            "privacy.grdp",
            "settings_strings.grdp",
            "generated_resources.grd",
            "android_chrome_strings.grd",
        ]
    );
    assert!(fwd
        .upstream_paths()
        .all(|p| p.file_name() != Some("chromeos_strings.grdp")));

    let renamed = ResourcePath::new(src.join("chrome/app/chromium_strings.grd")).unwrap();
    assert_eq!(
        fwd.get(&renamed),
        Some(&ResourcePath::new(src.join("brave/app/brave_strings.grd")).unwrap())
    );

    // part mirrors its parent's downstream directory
    let privacy = ResourcePath::new(src.join("chrome/app/privacy.grdp")).unwrap();
    assert_eq!(
        fwd.get(&privacy),
        Some(&ResourcePath::new(src.join("brave/app/privacy.grdp")).unwrap())
    );
}

#[test]
fn every_part_precedes_its_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let reg = default_registry(src);
    let fwd = reg.forward().unwrap();
    for m in fwd {
        let parts =
            grdsync_parsers::read_part_files(reg.file_system(), m.upstream.as_path()).unwrap();
        let parent_pos = fwd.position(&m.upstream).unwrap();
        for part in parts {
            let part_path = m.upstream.sibling(&part);
            if let Some(pos) = fwd.position(&part_path) {
                assert!(pos < parent_pos, "{part_path} must come before {}", m.upstream);
            }
        }
    }
}

#[test]
fn inverse_recovers_every_upstream_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let reg = default_registry(src);
    let fwd = reg.forward().unwrap();
    let inv = reg.inverse().unwrap();
    assert_eq!(fwd.len(), inv.len());
    for m in fwd {
        assert_eq!(inv.get(&m.downstream), Some(&m.upstream));
    }
}

#[test]
fn path_views_cover_downstream_surface() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let reg = default_registry(src);
    let all = reg.all_downstream_paths().unwrap();
    assert_eq!(all.len(), 4 + 9);
    assert_eq!(&all[..4], reg.downstream_only_paths());
    assert_eq!(reg.generated_paths().unwrap().len(), 9);

    let top = reg.top_level_paths().unwrap();
    assert_eq!(top.len(), 9);
    assert!(top
        .iter()
        .all(|p| TOP_LEVEL_EXTS.contains(&p.extension().unwrap())));
    assert!(top
        .iter()
        .any(|p| p.file_name() == Some("messages.json")));
}

#[test]
fn views_are_cached_for_the_registry_lifetime() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let reg = default_registry(src);
    let first = reg.forward().unwrap().clone();

    // upstream restructures after the first read
    write(src, "components/components_strings.grd", &grd(&["new_part.grdp"]));
    write(src, "components/new_part.grdp", &grd(&[]));

    assert_eq!(reg.forward().unwrap(), &first);
    assert!(std::ptr::eq(reg.forward().unwrap(), reg.forward().unwrap()));

    // a fresh registry sees the change
    let fresh = MappingRegistry::with_std_fs(reg.spec().clone());
    let names = file_names(fresh.forward().unwrap().upstream_paths());
    assert!(names.contains(&"new_part.grdp".to_string()));
    assert!(!names.contains(&"autofill_strings.grdp".to_string()));
}

#[test]
fn missing_family_root_names_the_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);
    std::fs::remove_file(src.join("chrome/app/generated_resources.grd")).unwrap();

    let reg = default_registry(src);
    let err = reg.forward().unwrap_err();
    assert!(err.to_string().contains("generated_resources.grd"), "{err}");
}

#[test]
fn conflicting_renamed_pair_is_an_invariant_violation() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = tmp.path();
    upstream_checkout(src);

    let mut spec = default_spec(src);
    // same downstream as the components_strings family root
    spec.renamed.push((
        ResourcePath::new(src.join("components/other.grd")).unwrap(),
        ResourcePath::new(src.join("brave/components/components_strings.grd")).unwrap(),
    ));
    let reg = MappingRegistry::with_std_fs(spec);
    let err = reg.forward().unwrap_err();
    assert!(
        matches!(err, grdsync_services::GrdSyncError::Invariant { .. }),
        "{err}"
    );
}
