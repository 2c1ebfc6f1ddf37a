pub mod http;
pub mod ship24_api;
pub mod translate_api;

pub use http::build_client;
pub use ship24_api::Ship24Api;
pub use translate_api::LibreTranslateApi;
