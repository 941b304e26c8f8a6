pub mod job;
pub mod matches;
pub mod preferences;
pub mod user;
