use crate::{ProfileMatch, Reading, Result};
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

#[derive(Clone)]
pub struct DecodeMetrics {
    pub lookups: IntCounter,
    pub lookup_fallbacks: IntCounter,
    pub decodes: IntCounter,
    pub decode_errors: IntCounter,
}

/// Prometheus counters for profile lookups and report decodes.
///
/// Nothing is recorded implicitly; callers report each outcome.
#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub dev: DecodeMetrics,
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let counter = |name: &str, help: &str| {
            IntCounter::new(name, help).map_err(|e| format!("metrics init error: {e}"))
        };
        let dev = DecodeMetrics {
            lookups: counter("temper_lookups_total", "Profile lookups")?,
            lookup_fallbacks: counter(
                "temper_lookup_fallbacks_total",
                "Lookups answered by the generic_fm75 profile",
            )?,
            decodes: counter("temper_decodes_total", "Reports decoded")?,
            decode_errors: counter("temper_decode_errors_total", "Reports rejected as too short")?,
        };
        let _ = registry.register(Box::new(dev.lookups.clone()));
        let _ = registry.register(Box::new(dev.lookup_fallbacks.clone()));
        let _ = registry.register(Box::new(dev.decodes.clone()));
        let _ = registry.register(Box::new(dev.decode_errors.clone()));
        Ok(Self { registry, dev })
    }

    pub fn record_lookup(&self, how: ProfileMatch) {
        self.dev.lookups.inc();
        if how == ProfileMatch::Fallback {
            self.dev.lookup_fallbacks.inc();
        }
    }

    pub fn record_decode(&self, outcome: &Result<Reading>) {
        match outcome {
            Ok(_) => self.dev.decodes.inc(),
            Err(_) => self.dev.decode_errors.inc(),
        }
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, resolve};

    #[test]
    fn counts_lookups_and_decodes() {
        let hub = MetricsHub::new().unwrap();
        let (profile, how) = resolve("TEMPerV1.4");
        hub.record_lookup(how);
        hub.record_lookup(resolve("mystery").1);
        hub.record_decode(&decode(profile, &[0u8; 8]));
        hub.record_decode(&decode(profile, &[0u8; 2]));

        assert_eq!(hub.dev.lookups.get(), 2);
        assert_eq!(hub.dev.lookup_fallbacks.get(), 1);
        assert_eq!(hub.dev.decodes.get(), 1);
        assert_eq!(hub.dev.decode_errors.get(), 1);

        let text = hub.encode_text();
        assert!(text.contains("temper_lookup_fallbacks_total 1"));
        assert!(text.contains("temper_decode_errors_total 1"));
    }
}
