pub mod league;
pub mod tenant;
pub mod user;
