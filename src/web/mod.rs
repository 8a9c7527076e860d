pub mod handlers;
pub mod models;
pub mod responses;
pub mod routes;
pub mod validation;
