use std::fs;
use std::path::PathBuf;

use election::{LoadSampler, NULL_LOAD};

const LOADAVG_PATH: &str = "/proc/loadavg";

/// Samples the one-minute load average of the host divided by its CPU count.
/// Reports `NULL_LOAD` when the load average cannot be read.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemLoadSampler {
    loadavg_path: PathBuf,
    cpus: usize,
}

impl SystemLoadSampler {
    pub fn new() -> SystemLoadSampler {
        SystemLoadSampler::with_source(PathBuf::from(LOADAVG_PATH), num_cpus::get())
    }

    /// Reads the load average from a file in `/proc/loadavg` format.
    pub fn with_source(loadavg_path: PathBuf, cpus: usize) -> SystemLoadSampler {
        SystemLoadSampler { loadavg_path, cpus }
    }

    fn read_load_average(&self) -> Result<f64, String> {
        let content = fs::read_to_string(&self.loadavg_path).map_err(|err| err.to_string())?;
        let first = content
            .split_whitespace()
            .next()
            .ok_or_else(|| "empty load average".to_string())?;

        first.parse::<f64>().map_err(|err| err.to_string())
    }
}

impl Default for SystemLoadSampler {
    fn default() -> Self {
        SystemLoadSampler::new()
    }
}

impl LoadSampler for SystemLoadSampler {
    fn sample_load(&self) -> f64 {
        if self.cpus == 0 {
            warn!("No CPUs reported, return null load value: {}", NULL_LOAD);
            return NULL_LOAD;
        }

        match self.read_load_average() {
            Ok(load_average) => load_average / self.cpus as f64,
            Err(err) => {
                warn!(
                    "Cannot read {}: {}. Return null load value: {}",
                    self.loadavg_path.display(),
                    err,
                    NULL_LOAD
                );
                NULL_LOAD
            }
        }
    }
}
