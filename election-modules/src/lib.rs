#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate election;

mod leader_task;
mod load;
mod store;

pub use leader_task::LoggingLeaderTask;
pub use load::fixed_load_sampler::FixedLoadSampler;
pub use load::randomized_load_sampler::RandomizedLoadSampler;
pub use load::system_load_sampler::SystemLoadSampler;
pub use store::{MemoryCoordinationStore, MemorySession};
