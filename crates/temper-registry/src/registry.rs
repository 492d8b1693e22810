use crate::SensorChipType::{self, Fm75, Si7021};
use crate::SensorProfile;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Model name whose profile answers every unrecognised product string.
pub const FALLBACK_MODEL: &str = "generic_fm75";

type Layout = (
    &'static str,
    &'static [usize],
    Option<&'static [usize]>,
    SensorChipType,
);

// model, temperature offsets, humidity offsets, chip
const BUILTIN: &[Layout] = &[
    ("TEMPer2V1.3", &[2, 4], None, Fm75),
    ("TEMPerV1.2", &[2], None, Fm75),
    ("TEMPerV1.4", &[2], None, Fm75),
    // single sensor, not at the usual offset
    ("TEMPer1F_V1.3", &[4], None, Fm75),
    ("TEMPERHUM1V1.2", &[2], Some(&[4]), Si7021),
    ("TEMPERHUM1V1.3", &[2], Some(&[4]), Si7021),
    ("TEMPerHumiV1.0", &[2], Some(&[4]), Fm75),
    ("TEMPerHumiV1.1", &[2], Some(&[4]), Fm75),
    ("TEMPer1F_H1_V1.4", &[2], Some(&[4]), Fm75),
    ("TEMPerNTC1.O", &[2, 4, 6], None, Fm75),
    ("TEMPer1V1.4", &[2], None, Fm75),
    ("TEMPer2_V3.7", &[2, 10], None, Fm75),
    ("TEMPer2V1.4", &[2], None, Fm75),
    // 3553:a001, inner and outer probe
    ("TEMPer2", &[2, 10], None, Fm75),
    (FALLBACK_MODEL, &[2, 4], None, Fm75),
];

/// How a model name was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMatch {
    Exact,
    Fallback,
}

/// Model name to profile table with a `generic_fm75` fallback.
///
/// Lookups are exact and case-sensitive. The process-wide built-in table is reached
/// through [`lookup`] and [`resolve`]; build an owned registry with
/// [`ProfileRegistry::builtin`] to layer extra models on top.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<String, SensorProfile>,
    fallback: SensorProfile,
}

impl ProfileRegistry {
    /// Registry seeded with every known TEMPer model.
    pub fn builtin() -> Self {
        let profiles: HashMap<String, SensorProfile> = BUILTIN
            .iter()
            .map(|(model, temp, hum, chip)| {
                (model.to_string(), SensorProfile::new(temp, *hum, *chip))
            })
            .collect();
        let fallback = profiles
            .get(FALLBACK_MODEL)
            .cloned()
            .unwrap_or_else(|| SensorProfile::new(&[2, 4], None, Fm75));
        Self { profiles, fallback }
    }

    /// Add or replace a model. Replacing `generic_fm75` also replaces the fallback.
    pub fn insert(&mut self, model: impl Into<String>, profile: SensorProfile) {
        let model = model.into();
        if model == FALLBACK_MODEL {
            self.fallback = profile.clone();
        }
        self.profiles.insert(model, profile);
    }

    /// Exact, case-sensitive match, else the fallback profile. Never fails.
    pub fn resolve(&self, model: &str) -> (&SensorProfile, ProfileMatch) {
        match self.profiles.get(model) {
            Some(profile) => (profile, ProfileMatch::Exact),
            None => {
                tracing::debug!(model, "unrecognised model, using {FALLBACK_MODEL}");
                (&self.fallback, ProfileMatch::Fallback)
            }
        }
    }

    /// [`resolve`](Self::resolve) without the match kind.
    pub fn lookup(&self, model: &str) -> &SensorProfile {
        self.resolve(model).0
    }

    /// Whether `model` has its own entry.
    pub fn contains(&self, model: &str) -> bool {
        self.profiles.contains_key(model)
    }

    /// Registered model names, in no particular order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of registered models, `generic_fm75` included.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn shared() -> &'static ProfileRegistry {
    static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ProfileRegistry::builtin)
}

/// Profile for `model` from the built-in table; never fails.
pub fn lookup(model: &str) -> &'static SensorProfile {
    shared().lookup(model)
}

/// Built-in profile for `model` and whether it was an exact match.
pub fn resolve(model: &str) -> (&'static SensorProfile, ProfileMatch) {
    shared().resolve(model)
}
