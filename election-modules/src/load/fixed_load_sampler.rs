use election::LoadSampler;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLoadSampler {
    load: f64,
}

impl FixedLoadSampler {
    pub fn new(load: f64) -> FixedLoadSampler {
        FixedLoadSampler { load }
    }
}

impl LoadSampler for FixedLoadSampler {
    fn sample_load(&self) -> f64 {
        self.load
    }
}
