pub mod assignment;
pub mod rotation;
pub mod simulated;
