pub mod balance;
pub mod extra_time;
pub mod staleness;
