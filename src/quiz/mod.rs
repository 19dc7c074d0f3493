pub mod round;
pub mod sampler;
pub mod words;
