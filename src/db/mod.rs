//! Database persistence layer for finished game results.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{NewResultRecord, ResultRecord};
pub use repository::ResultRepository;
