#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Binary invocation rooted in `cwd` so logs and config lookups stay inside
/// the test's temp dir.
pub fn bin_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grdsync").expect("grdsync built");
    cmd.current_dir(cwd).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

pub fn grd(parts: &[&str]) -> String {
    let body: String = parts
        .iter()
        .map(|p| format!("    <part file=\"{p}\" />\n"))
        .collect();
    format!("<grit>\n  <messages>\n{body}  </messages>\n</grit>\n")
}

pub fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(&p, content).unwrap();
    p
}

/// Upstream checkout matching the built-in mapping, with downstream
/// directories in place.
pub fn default_checkout(src: &Path) {
    write(src, "chrome/app/settings_chromium_strings.grdp", &grd(&[]));
    write(
        src,
        "chrome/app/chromium_strings.grd",
        &grd(&["settings_chromium_strings.grdp"]),
    );
    write(src, "components/components_chromium_strings.grd", &grd(&[]));
    write(src, "components/components_strings.grd", &grd(&["autofill_strings.grdp"]));
    write(src, "components/autofill_strings.grdp", &grd(&[]));
    write(
        src,
        "chrome/app/generated_resources.grd",
        &grd(&["settings_strings.grdp", "chromeos_strings.grdp"]),
    );
    write(src, "chrome/app/settings_strings.grdp", &grd(&[]));
    write(
        src,
        "chrome/browser/ui/android/strings/android_chrome_strings.grd",
        &grd(&[]),
    );
    for dir in ["brave/app", "brave/components", "brave/browser/ui/android/strings"] {
        fs::create_dir_all(src.join(dir)).unwrap();
    }
}

pub fn stdout_json(out: &std::process::Output) -> serde_json::Value {
    let s = String::from_utf8_lossy(&out.stdout).to_string();
    serde_json::from_str(&s).expect("valid json on stdout")
}
