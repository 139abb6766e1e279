pub mod auth;
pub mod dispatch;
pub mod metrics;
pub mod requests;
pub mod sessions;
pub mod shared;
