pub mod routes;
pub mod startup;
pub mod state;
pub mod clients;
pub mod errors;
pub mod openapi;

pub use startup::run;
