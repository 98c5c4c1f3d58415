pub mod files;
pub mod handlers;
pub mod pagination;
pub mod routes;

pub use routes::create_router;
