//! Deterministic mock predictor.
//!
//! Produces alternating collector / non-collector zones with random lengths.
//! The RNG is seeded from a stable hash of the well name, so the same well
//! always gets the same curve across runs and platforms.

use super::{CollectorPredictor, Prediction, PredictionRequest};
use crate::config::PredictionConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct MockPredictor {
    zone_min_len: usize,
    zone_max_len: usize,
}

impl MockPredictor {
    /// Zone lengths are drawn from `[zone_min_len, zone_max_len)`. Bounds are
    /// coerced so at least one length is possible.
    pub fn new(zone_min_len: usize, zone_max_len: usize) -> Self {
        let zone_min_len = zone_min_len.max(1);
        Self {
            zone_min_len,
            zone_max_len: zone_max_len.max(zone_min_len + 1),
        }
    }

    pub fn from_config(config: &PredictionConfig) -> Self {
        Self::new(config.zone_min_len, config.zone_max_len)
    }

    /// Seed for a well name (FNV-1a, independent of the std hasher).
    pub fn seed_for(well_id: &str) -> u64 {
        well_id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
            (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        })
    }

    fn zone_len(&self, rng: &mut StdRng) -> usize {
        rng.gen_range(self.zone_min_len..self.zone_max_len)
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::from_config(&PredictionConfig::default())
    }
}

impl CollectorPredictor for MockPredictor {
    fn name(&self) -> &str {
        "mock"
    }

    fn predict(&self, request: &PredictionRequest) -> Prediction {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(&request.well_id));
        let depth = request.depths();

        let mut value = Vec::with_capacity(depth.len());
        let mut current = 1.0;
        let mut remaining = self.zone_len(&mut rng);
        for _ in 0..depth.len() {
            if remaining == 0 {
                current = 1.0 - current;
                remaining = self.zone_len(&mut rng);
            }
            value.push(current);
            remaining -= 1;
        }

        Prediction {
            well_id: request.well_id.clone(),
            x: request.x,
            y: request.y,
            depth,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> PredictionRequest {
        PredictionRequest::for_depth_range(name, 10.0, 20.0, (0.0, 500.0), 5.0, 10)
    }

    #[test]
    fn test_deterministic_per_well() {
        let p = MockPredictor::default();
        assert_eq!(p.predict(&request("WELL_A")), p.predict(&request("WELL_A")));
    }

    #[test]
    fn test_binary_and_starts_collector() {
        let pred = MockPredictor::default().predict(&request("WELL_B"));
        assert_eq!(pred.value.len(), 101);
        assert_eq!(pred.value[0], 1.0);
        assert!(pred.value.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_zone_lengths_within_bounds() {
        let pred = MockPredictor::new(5, 15).predict(&request("WELL_C"));
        let mut runs = Vec::new();
        let mut len = 1;
        for w in pred.value.windows(2) {
            if w[0] == w[1] {
                len += 1;
            } else {
                runs.push(len);
                len = 1;
            }
        }
        // last run may be cut short by the end of the interval
        assert!(runs.iter().all(|&r| (5..15).contains(&r)), "{runs:?}");
    }

    #[test]
    fn test_degenerate_bounds_coerced() {
        let p = MockPredictor::new(0, 0);
        let pred = p.predict(&request("WELL_D"));
        // every zone is exactly one sample long
        assert!(pred.value.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_seed_is_stable() {
        assert_eq!(MockPredictor::seed_for(""), 0xcbf2_9ce4_8422_2325);
        assert_ne!(MockPredictor::seed_for("A"), MockPredictor::seed_for("B"));
    }
}
