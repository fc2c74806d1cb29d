pub mod decision;
pub mod hostname;
pub mod middleware;
pub mod rewrite;
