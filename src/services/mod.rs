pub mod remote_service;
pub mod user_service;

pub use remote_service::*;
pub use user_service::*;
