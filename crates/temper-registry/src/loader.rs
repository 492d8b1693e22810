//! YAML overlays for models missing from the built-in table.
//!
//! ```yaml
//! TEMPer2_V4.1:
//!   temperature_offsets: [2, 10]
//!   chip_type: fm75
//!   report_len: 16
//! ```

use crate::registry::ProfileRegistry;
use crate::{SensorChipType, SensorProfile};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_REPORT_LEN: usize = 8;

// Mirrors SensorProfile field for field; kept flat so unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverlayProfile {
    temperature_offsets: Vec<usize>,
    #[serde(default)]
    humidity_offsets: Option<Vec<usize>>,
    #[serde(default)]
    chip_type: SensorChipType,
    #[serde(default)]
    report_len: Option<usize>,
}

impl OverlayProfile {
    fn into_profile(self) -> SensorProfile {
        SensorProfile {
            temperature_offsets: self.temperature_offsets,
            humidity_offsets: self.humidity_offsets,
            chip_type: self.chip_type,
        }
    }
}

/// One validated overlay model.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    pub model: String,
    pub profile: SensorProfile,
}

pub fn parse_profiles(raw: &str) -> anyhow::Result<Vec<ProfileEntry>> {
    let val: Value = serde_yaml::from_str(raw).context("parsing yaml")?;
    if val.is_null() {
        return Ok(Vec::new());
    }
    let table: BTreeMap<String, OverlayProfile> =
        serde_yaml::from_value(val).context("decoding profiles")?;
    let mut out = Vec::with_capacity(table.len());
    for (model, overlay) in table {
        let report_len = overlay.report_len.unwrap_or(DEFAULT_REPORT_LEN);
        let profile = overlay.into_profile();
        profile
            .validate(report_len)
            .with_context(|| format!("invalid profile for {model}"))?;
        out.push(ProfileEntry { model, profile });
    }
    Ok(out)
}

pub fn load_profiles_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<ProfileEntry>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading profiles: {}", path.display()))?;
    parse_profiles(&raw).with_context(|| format!("loading profiles: {}", path.display()))
}

/// Built-in table plus every `.yml`/`.yaml` file in `dir`, applied in file name order.
pub fn load_profiles_dir(dir: impl AsRef<Path>) -> anyhow::Result<ProfileRegistry> {
    let dir = dir.as_ref();
    let mut overlays: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading overlay dir: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .with_context(|| format!("listing overlay dir: {}", dir.display()))?;
    overlays.retain(|path| {
        path.extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml")
    });
    overlays.sort();

    let mut reg = ProfileRegistry::builtin();
    for p in overlays {
        let loaded = load_profiles_file(&p)?;
        tracing::info!(path = %p.display(), count = loaded.len(), "loaded overlay profiles");
        for e in loaded {
            reg.insert(e.model, e.profile);
        }
    }
    Ok(reg)
}
