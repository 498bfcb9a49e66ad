pub mod documents;
pub mod health;
pub mod query;
pub mod service_info;
