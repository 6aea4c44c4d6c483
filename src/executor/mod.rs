// SPDX-License-Identifier: GPL-3.0-only
pub mod error;
pub mod models;
pub mod rest;
pub mod traits;

pub use error::ExecutorError;
pub use models::{ApiErrorDetail, InsertResult, QueryResult, Record, RequestOptions, UserContext};
pub use rest::RestQueryExecutor;
pub use traits::QueryExecutor;
