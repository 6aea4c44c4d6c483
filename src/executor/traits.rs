// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use crate::executor::error::ExecutorError;
use crate::executor::models::{InsertResult, QueryResult, Record, RequestOptions, UserContext};

/// Remote metadata store access used by the registrar.
///
/// Every call takes the caller's session explicitly; implementations must not
/// fall back to any ambient credential.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a read-only SOQL statement
    async fn query(
        &self,
        statement: &str,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<QueryResult, ExecutorError>;

    /// Insert a single row into `table`
    ///
    /// A row the platform refused is returned as `Ok` with `success == false`;
    /// `Err` is reserved for calls that did not complete.
    async fn insert(
        &self,
        table: &str,
        fields: &Record,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<InsertResult, ExecutorError>;
}
