use crate::ProfileError;
use serde::{Deserialize, Serialize};

/// Sensor chip family; selects the raw-to-physical transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChipType {
    /// Signed 1/256 °C units.
    #[default]
    Fm75,
    /// Silicon Labs Si7021 combined temperature/humidity sensor.
    Si7021,
}

/// Byte layout of one device model's raw report.
///
/// Offsets index the start of a 2-byte big-endian field. Temperature offsets are
/// ordered by physical sensor position (inner before outer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorProfile {
    pub temperature_offsets: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_offsets: Option<Vec<usize>>,
    #[serde(default)]
    pub chip_type: SensorChipType,
}

impl SensorProfile {
    /// Build a profile from borrowed offset tables.
    pub fn new(
        temperature_offsets: &[usize],
        humidity_offsets: Option<&[usize]>,
        chip_type: SensorChipType,
    ) -> Self {
        Self {
            temperature_offsets: temperature_offsets.to_vec(),
            humidity_offsets: humidity_offsets.map(<[usize]>::to_vec),
            chip_type,
        }
    }

    /// Whether the device carries a humidity sensor.
    pub fn has_humidity(&self) -> bool {
        self.humidity_offsets.is_some()
    }

    /// Every configured offset, temperature first.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.temperature_offsets
            .iter()
            .chain(self.humidity_offsets.iter().flatten())
            .copied()
    }

    /// Shortest report that holds every configured field.
    pub fn min_report_len(&self) -> usize {
        self.offsets()
            .map(|o| o.saturating_add(2))
            .max()
            .unwrap_or(0)
    }

    /// Check the layout against a report of `report_len` bytes.
    pub fn validate(&self, report_len: usize) -> Result<(), ProfileError> {
        if self.temperature_offsets.is_empty() {
            return Err(ProfileError::NoTemperatureSensors);
        }
        for offset in self.offsets() {
            if offset % 2 != 0 {
                return Err(ProfileError::OddOffset(offset));
            }
            if offset.checked_add(2).map_or(true, |end| end > report_len) {
                return Err(ProfileError::OffsetOutOfRange { offset, report_len });
            }
        }
        Ok(())
    }
}

/// Decoded values, in the order of the profile's offsets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperatures: Vec<f64>,
    /// Relative humidity in percent; empty when the device has no humidity sensor.
    pub humidities: Vec<f64>,
}

impl Reading {
    pub fn temperatures_f(&self) -> Vec<f64> {
        self.temperatures
            .iter()
            .map(|c| c * 9.0 / 5.0 + 32.0)
            .collect()
    }
}

/// Linear per-sensor correction, `value * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub scale: f64,
    pub offset: f64,
}

impl Calibration {
    pub fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}
