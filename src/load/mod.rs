/// Reported when the load of the host cannot be measured.
pub const NULL_LOAD: f64 = -1.0;

/// Provides the normalized load of the host a candidate runs on:
/// 0.0 is idle, 1.0 is saturated. Returns `NULL_LOAD` when the load is unavailable.
pub trait LoadSampler: Send + 'static {
    fn sample_load(&self) -> f64;
}
