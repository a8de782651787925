pub mod api;

pub use api::{ApiClient, ApiError, CheckReport, EndpointInfo, NewEndpoint};
