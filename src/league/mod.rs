pub mod bracket;
pub mod fixtures;
pub mod knockout;
pub mod schedule;
