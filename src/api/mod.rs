pub mod http;
pub mod store;
pub mod types;

pub use http::HttpThreadStore;
pub use store::{ApiError, ThreadStore};
pub use types::{Message, Role, Thread, ThreadId};
