pub mod handlers;
pub mod pages;
pub mod responses;
pub mod server;

pub use responses::SubmitResponse;
pub use server::{create_router, start_api_server, AppState};
