//! Built-in mapping for the Chromium source layout mirrored into the branded
//! `brave/` tree. All paths are relative to the checkout root.

use crate::{FamilyCfg, MappingCfg, PairCfg};

/// ChromeOS-only strings; not tracked downstream.
pub const CHROMEOS_STRINGS_PART: &str = "chromeos_strings.grdp";

// Renamed on the way down, so they cannot be discovered from a family root.
// The settings part comes first: it belongs to chromium_strings.grd.
const RENAMED: &[(&str, &str)] = &[
    (
        "chrome/app/settings_chromium_strings.grdp",
        "brave/app/settings_brave_strings.grdp",
    ),
    ("chrome/app/chromium_strings.grd", "brave/app/brave_strings.grd"),
    (
        "components/components_chromium_strings.grd",
        "brave/components/components_brave_strings.grd",
    ),
];

const FAMILIES: &[(&str, &str, &[&str])] = &[
    (
        "components/components_strings.grd",
        "brave/components/components_strings.grd",
        &[],
    ),
    (
        "chrome/app/generated_resources.grd",
        "brave/app/generated_resources.grd",
        &[CHROMEOS_STRINGS_PART],
    ),
    (
        "chrome/browser/ui/android/strings/android_chrome_strings.grd",
        "brave/browser/ui/android/strings/android_chrome_strings.grd",
        &[],
    ),
];

// Product-only strings: sent to translation, never copied from upstream.
const DOWNSTREAM_ONLY: &[&str] = &[
    "brave/app/brave_generated_resources.grd",
    "brave/components/resources/brave_components_strings.grd",
    "brave/components/brave_extension/extension/brave_extension/_locales/en_US/messages.json",
    "brave/browser/ui/android/strings/android_brave_strings.grd",
];

pub fn default_mapping() -> MappingCfg {
    MappingCfg {
        renamed: Some(
            RENAMED
                .iter()
                .map(|(up, down)| PairCfg {
                    upstream: up.to_string(),
                    downstream: down.to_string(),
                })
                .collect(),
        ),
        families: Some(
            FAMILIES
                .iter()
                .map(|(up, down, exclude)| FamilyCfg {
                    upstream: up.to_string(),
                    downstream: down.to_string(),
                    exclude: exclude.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        ),
        downstream_only: Some(DOWNSTREAM_ONLY.iter().map(|s| s.to_string()).collect()),
    }
}
