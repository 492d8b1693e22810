use crate::{Calibration, DecodeError, Reading, Result, SensorChipType, SensorProfile};

#[derive(Clone, Copy)]
enum Quantity {
    Temperature,
    Humidity,
}

/// Decode every configured field of `raw` under `profile`.
///
/// Fails with [`DecodeError::ShortReport`] if any field runs past the end of `raw`;
/// all offsets are checked before anything is converted.
pub fn decode(profile: &SensorProfile, raw: &[u8]) -> Result<Reading> {
    check_len(profile, raw)?;
    let temperatures = profile
        .temperature_offsets
        .iter()
        .map(|&o| convert(profile.chip_type, Quantity::Temperature, field(raw, o)))
        .collect();
    let humidities = profile
        .humidity_offsets
        .iter()
        .flatten()
        .map(|&o| convert(profile.chip_type, Quantity::Humidity, field(raw, o)))
        .collect();
    Ok(Reading {
        temperatures,
        humidities,
    })
}

/// [`decode`], then apply `calibration[i]` to temperature `i`.
pub fn decode_calibrated(
    profile: &SensorProfile,
    raw: &[u8],
    calibration: &[Calibration],
) -> Result<Reading> {
    let mut reading = decode(profile, raw)?;
    for (value, cal) in reading.temperatures.iter_mut().zip(calibration) {
        *value = cal.apply(*value);
    }
    Ok(reading)
}

fn check_len(profile: &SensorProfile, raw: &[u8]) -> Result<()> {
    for offset in profile.offsets() {
        let needed = offset.saturating_add(2);
        if offset.checked_add(2).map_or(true, |end| raw.len() < end) {
            tracing::debug!(offset, len = raw.len(), "report too short for profile");
            return Err(DecodeError::ShortReport {
                offset,
                needed,
                len: raw.len(),
            });
        }
    }
    Ok(())
}

// caller has checked bounds
fn field(raw: &[u8], offset: usize) -> [u8; 2] {
    [raw[offset], raw[offset + 1]]
}

fn convert(chip: SensorChipType, quantity: Quantity, bytes: [u8; 2]) -> f64 {
    match chip {
        // Signed, 1/256 degree per LSB. Humidity fields on these devices scale the same way.
        SensorChipType::Fm75 => f64::from(i16::from_be_bytes(bytes)) / 256.0,
        SensorChipType::Si7021 => {
            let x = f64::from(u16::from_be_bytes(bytes)) / 65536.0;
            match quantity {
                Quantity::Temperature => x * 175.72 - 46.85,
                Quantity::Humidity => (x * 125.0 - 6.0).clamp(0.0, 100.0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup;

    fn report(fields: &[(usize, [u8; 2])], len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        for (offset, bytes) in fields {
            buf[*offset..*offset + 2].copy_from_slice(bytes);
        }
        buf
    }

    #[test]
    fn fm75_scaling() {
        let profile = lookup("TEMPer2V1.3");
        let raw = report(&[(2, 512i16.to_be_bytes()), (4, (-256i16).to_be_bytes())], 8);
        let reading = decode(profile, &raw).unwrap();
        assert_eq!(reading.temperatures, vec![2.0, -1.0]);
        assert!(reading.humidities.is_empty());
    }

    #[test]
    fn fm75_real_report() {
        // TEMPer2 report, inner 0x0b54, outer 0x09ca
        let raw = [
            0x80, 0x80, 0x0b, 0x54, 0x4e, 0x20, 0x00, 0x00, 0x80, 0x01, 0x09, 0xca, 0x4e, 0x20,
            0x00, 0x00,
        ];
        let reading = decode(lookup("TEMPer2"), &raw).unwrap();
        assert_eq!(reading.temperatures, vec![2900.0 / 256.0, 2506.0 / 256.0]);
    }

    #[test]
    fn fm75_humidity_uses_linear_scale() {
        let profile = lookup("TEMPerHumiV1.1");
        let raw = report(&[(2, 0x1600u16.to_be_bytes()), (4, 0x2d80u16.to_be_bytes())], 8);
        let reading = decode(profile, &raw).unwrap();
        assert_eq!(reading.temperatures, vec![22.0]);
        assert_eq!(reading.humidities, vec![45.5]);
    }

    #[test]
    fn si7021_temperature_extremes() {
        let profile = lookup("TEMPERHUM1V1.3");
        let zero = decode(profile, &report(&[], 8)).unwrap();
        assert_eq!(zero.temperatures, vec![-46.85]);

        let max = decode(profile, &report(&[(2, [0xff, 0xff])], 8)).unwrap();
        let expected = (65535.0 / 65536.0) * 175.72 - 46.85;
        assert_eq!(max.temperatures, vec![expected]);
        assert!((max.temperatures[0] - 128.8673).abs() < 1e-3);
    }

    #[test]
    fn si7021_humidity_is_clamped() {
        let profile = lookup("TEMPERHUM1V1.2");
        let low = decode(profile, &report(&[(4, [0x00, 0x00])], 8)).unwrap();
        assert_eq!(low.humidities, vec![0.0]);

        let high = decode(profile, &report(&[(4, [0xff, 0xff])], 8)).unwrap();
        assert_eq!(high.humidities, vec![100.0]);

        let mid = decode(profile, &report(&[(4, 0x8000u16.to_be_bytes())], 8)).unwrap();
        assert_eq!(mid.humidities, vec![0.5 * 125.0 - 6.0]);
    }

    #[test]
    fn short_report_fails_whole_decode() {
        let profile = lookup("TEMPer2");
        let raw = [0u8; 8];
        assert_eq!(
            decode(profile, &raw),
            Err(DecodeError::ShortReport {
                offset: 10,
                needed: 12,
                len: 8
            })
        );

        let hum = lookup("TEMPERHUM1V1.3");
        assert!(matches!(
            decode(hum, &[0u8; 5]),
            Err(DecodeError::ShortReport { offset: 4, .. })
        ));
        assert!(decode(hum, &[0u8; 6]).is_ok());
        assert!(decode(hum, &[]).is_err());
    }

    #[test]
    fn report_exactly_min_len_decodes() {
        let profile = lookup("TEMPer2");
        assert_eq!(profile.min_report_len(), 12);
        assert!(matches!(
            decode(profile, &[0u8; 11]),
            Err(DecodeError::ShortReport {
                offset: 10,
                needed: 12,
                len: 11
            })
        ));
        let reading = decode(profile, &report(&[(10, 0x0100u16.to_be_bytes())], 12)).unwrap();
        assert_eq!(reading.temperatures, vec![0.0, 1.0]);
    }

    #[test]
    fn huge_offset_is_short_report() {
        let profile = SensorProfile::new(&[usize::MAX - 1], None, SensorChipType::Fm75);
        assert_eq!(
            decode(&profile, &[0u8; 8]),
            Err(DecodeError::ShortReport {
                offset: usize::MAX - 1,
                needed: usize::MAX,
                len: 8
            })
        );

        let profile = SensorProfile::new(&[2], Some(&[usize::MAX]), SensorChipType::Si7021);
        assert!(matches!(
            decode(&profile, &[0u8; 8]),
            Err(DecodeError::ShortReport {
                offset: usize::MAX,
                ..
            })
        ));
    }

    #[test]
    fn decode_is_deterministic() {
        let profile = lookup("TEMPERHUM1V1.3");
        let raw = report(&[(2, [0x66, 0x4c]), (4, [0x7a, 0x31])], 8);
        let a = decode(profile, &raw).unwrap();
        let b = decode(profile, &raw).unwrap();
        let bits = |r: &Reading| -> Vec<u64> {
            r.temperatures
                .iter()
                .chain(&r.humidities)
                .map(|v| v.to_bits())
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn calibration_applies_per_sensor() {
        let profile = lookup("TEMPerNTC1.O");
        let raw = report(
            &[
                (2, 0x0a00u16.to_be_bytes()),
                (4, 0x0a00u16.to_be_bytes()),
                (6, 0x0a00u16.to_be_bytes()),
            ],
            8,
        );
        let cal = [Calibration::new(1.0, -0.5), Calibration::new(2.0, 0.0)];
        let reading = decode_calibrated(profile, &raw, &cal).unwrap();
        assert_eq!(reading.temperatures, vec![9.5, 20.0, 10.0]);
    }

    #[test]
    fn calibration_leaves_humidity_alone() {
        let profile = lookup("TEMPerHumiV1.0");
        let raw = report(&[(2, 0x0100u16.to_be_bytes()), (4, 0x0100u16.to_be_bytes())], 8);
        let reading = decode_calibrated(profile, &raw, &[Calibration::new(10.0, 1.0)]).unwrap();
        assert_eq!(reading.temperatures, vec![11.0]);
        assert_eq!(reading.humidities, vec![1.0]);
    }
}
