pub mod http_client;
pub mod mock;
pub mod pdf;
pub mod services;
pub mod storage;

pub use http_client::ApiClient;
pub use mock::MockMarketData;
pub use services::Services;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
