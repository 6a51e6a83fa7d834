// HTTP surface: JSON catalog endpoints plus the server that also mounts the pages

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::StorefrontServer;
