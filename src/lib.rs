pub mod error;
pub mod handler;
pub mod value_store;

pub use error::ApiError;
pub use handler::configure;
pub use value_store::ValueStore;
