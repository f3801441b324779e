pub mod fixed_load_sampler;
pub mod randomized_load_sampler;
pub mod system_load_sampler;
