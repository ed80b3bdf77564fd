//! Data Transfer Objects for Web API.

pub mod json;
pub mod query;
pub mod request;
pub mod response;

pub use json::JsonBody;
pub use query::QueryParams;
pub use request::*;
pub use response::*;
