//! temper-registry: sensor profiles and report decoding for TEMPer USB thermometers
//!
//! A device reports a product string such as `TEMPerV1.4`. [`lookup`] maps it to a
//! [`SensorProfile`] describing where the sensor fields sit in the raw HID report and
//! which chip produced them; [`decode`] turns the report bytes into a [`Reading`].
//! Unknown product strings resolve to the `generic_fm75` profile.

mod types;
pub use types::{Calibration, Reading, SensorChipType, SensorProfile};

mod error;
pub use error::{DecodeError, ProfileError, Result};

mod registry;
pub use registry::{lookup, resolve, ProfileMatch, ProfileRegistry, FALLBACK_MODEL};

mod loader;
pub use loader::{load_profiles_dir, load_profiles_file, parse_profiles, ProfileEntry};

mod decode;
pub use decode::{decode, decode_calibrated};

mod firmware;
pub use firmware::model_from_firmware;

mod metrics;
pub use metrics::{DecodeMetrics, MetricsHub};
