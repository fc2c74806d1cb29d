pub mod auth_handler;
pub mod league;
pub mod tenant_handler;
