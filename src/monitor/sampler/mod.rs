pub mod memory_sampler;

pub use memory_sampler::{MemorySampler, PressureSample};
