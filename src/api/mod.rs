pub mod attendance;
pub mod error;
