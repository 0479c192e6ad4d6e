pub mod fit;
pub mod matcher;
pub mod rng;
