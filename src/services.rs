pub mod climate_service;
pub mod error;
pub mod query_date;

pub use climate_service::{ClimateService, DatasetSummary};
pub use error::ServiceError;
pub use query_date::QueryDate;
