pub mod calculator;
pub mod dashboard;
pub mod equipment;
pub mod filter;
pub mod log;
pub mod session;
