// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::Config;
use crate::executor::{
    ExecutorError, InsertResult, QueryExecutor, QueryResult, Record, RequestOptions, UserContext,
};

/// A call observed by [`RecordingExecutor`]
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorCall {
    Query {
        statement: String,
        ctx: UserContext,
    },
    Insert {
        table: String,
        fields: Record,
        ctx: UserContext,
    },
}

#[derive(Debug, Clone)]
enum Scripted<T> {
    Ok(T),
    Fail { status: u16, message: String },
}

impl<T: Clone> Scripted<T> {
    fn resolve(&self) -> Result<T, ExecutorError> {
        match self {
            Scripted::Ok(value) => Ok(value.clone()),
            Scripted::Fail { status, message } => Err(ExecutorError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// In-memory executor answering scripted statements and recording every call.
///
/// Unscripted queries return an empty result; inserts succeed with id
/// "newRecordId" unless scripted otherwise.
pub struct RecordingExecutor {
    queries: Mutex<HashMap<String, Scripted<QueryResult>>>,
    insert: Mutex<Scripted<InsertResult>>,
    calls: Mutex<Vec<ExecutorCall>>,
    options: Mutex<Vec<RequestOptions>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            queries: Mutex::new(HashMap::new()),
            insert: Mutex::new(Scripted::Ok(InsertResult::created("newRecordId"))),
            calls: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
        }
    }

    pub fn on_query(&self, statement: &str, result: QueryResult) -> &Self {
        self.queries
            .lock()
            .unwrap()
            .insert(statement.to_string(), Scripted::Ok(result));
        self
    }

    pub fn fail_query(&self, statement: &str, status: u16, message: &str) -> &Self {
        self.queries.lock().unwrap().insert(
            statement.to_string(),
            Scripted::Fail {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn on_insert(&self, result: InsertResult) -> &Self {
        *self.insert.lock().unwrap() = Scripted::Ok(result);
        self
    }

    pub fn fail_insert(&self, status: u16, message: &str) -> &Self {
        *self.insert.lock().unwrap() = Scripted::Fail {
            status,
            message: message.to_string(),
        };
        self
    }

    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Options passed with each call, in call order
    pub fn options_seen(&self) -> Vec<RequestOptions> {
        self.options.lock().unwrap().clone()
    }

    pub fn queried_statements(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ExecutorCall::Query { statement, .. } => Some(statement),
                ExecutorCall::Insert { .. } => None,
            })
            .collect()
    }

    pub fn inserts(&self) -> Vec<(String, Record)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ExecutorCall::Insert { table, fields, .. } => Some((table, fields)),
                ExecutorCall::Query { .. } => None,
            })
            .collect()
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn query(
        &self,
        statement: &str,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<QueryResult, ExecutorError> {
        self.options.lock().unwrap().push(*options);
        self.calls.lock().unwrap().push(ExecutorCall::Query {
            statement: statement.to_string(),
            ctx: ctx.clone(),
        });

        match self.queries.lock().unwrap().get(statement) {
            Some(scripted) => scripted.resolve(),
            None => Ok(QueryResult::default()),
        }
    }

    async fn insert(
        &self,
        table: &str,
        fields: &Record,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<InsertResult, ExecutorError> {
        self.options.lock().unwrap().push(*options);
        self.calls.lock().unwrap().push(ExecutorCall::Insert {
            table: table.to_string(),
            fields: fields.clone(),
            ctx: ctx.clone(),
        });

        self.insert.lock().unwrap().resolve()
    }
}

/// Single-row query result built from `(field, value)` pairs
pub fn single_row(fields: &[(&str, &str)]) -> QueryResult {
    let record: Record = fields
        .iter()
        .map(|(key, value)| (key.to_string(), Value::from(*value)))
        .collect();
    QueryResult::from_records(vec![record])
}

pub fn test_context() -> UserContext {
    UserContext::new(
        "testUserName".to_string(),
        "https://test.my.salesforce.com".to_string(),
        "test-token".to_string(),
    )
}

/// Create a test configuration pointing at a fake org
pub fn create_test_config() -> Config {
    Config {
        instance_url: Some("https://test.my.salesforce.com".to_string()),
        api_version: "59.0".to_string(),
        target_username: Some("testUserName".to_string()),
        access_token: Some("test-token".to_string()),
        request_timeout_secs: 5,
        use_tooling_api: false,
        log_level: "error".to_string(), // Reduce log noise in tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_recording_executor_answers_empty() {
        let executor = RecordingExecutor::default();
        let result = executor
            .query("SELECT Id FROM Account", &test_context(), &RequestOptions::default())
            .await
            .unwrap();

        assert!(!result.has_matches());
        assert_eq!(executor.queried_statements(), vec!["SELECT Id FROM Account".to_string()]);
        assert_eq!(executor.options_seen(), vec![RequestOptions::default()]);
    }
}
