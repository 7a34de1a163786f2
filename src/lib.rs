pub mod api;
pub mod config;
pub mod flatten;
pub mod history;
pub mod http_client;
pub mod model;
pub mod sheet;
