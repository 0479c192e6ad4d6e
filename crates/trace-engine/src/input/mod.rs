pub mod queue;
pub mod capture;
