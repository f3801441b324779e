use election::LoadSampler;
use rand::Rng;

/// Provides a random load within a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomizedLoadSampler {
    range_start: f64,
    range_stop: f64,
}

impl RandomizedLoadSampler {
    /// Creates new RandomizedLoadSampler producing loads in [range_start, range_stop).
    pub fn new(range_start: f64, range_stop: f64) -> RandomizedLoadSampler {
        if !(range_start < range_stop) {
            panic!(
                "Invalid params: range_start : {}, range_stop : {}",
                range_start, range_stop
            )
        }
        RandomizedLoadSampler {
            range_start,
            range_stop,
        }
    }
}

impl Default for RandomizedLoadSampler {
    fn default() -> Self {
        RandomizedLoadSampler::new(0.0, 1.0)
    }
}

impl LoadSampler for RandomizedLoadSampler {
    fn sample_load(&self) -> f64 {
        let mut rng = rand::thread_rng();

        rng.gen_range(self.range_start, self.range_stop)
    }
}
