pub mod api_client;
pub mod backend_http;

pub use api_client::ApiClient;
pub use backend_http::HttpBackend;
