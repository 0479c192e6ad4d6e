pub mod manifest;
pub mod outline;
