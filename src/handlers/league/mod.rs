pub mod bracket_handler;
pub mod schedule_handler;
