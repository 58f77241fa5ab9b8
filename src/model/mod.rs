pub mod attendance;
pub mod filter;
