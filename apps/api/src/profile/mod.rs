pub mod filters;
pub mod handlers;
pub mod queries;
pub mod views;
