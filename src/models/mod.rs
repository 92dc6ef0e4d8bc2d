pub mod attendance;
pub mod empty_bag;
pub mod lenient;
pub mod record;
pub mod resource;
pub mod safety_talk;
pub mod spot_check;
pub mod stationary;
pub mod trucker_talk;
pub mod user;
pub mod verification;
pub mod warehouse;
