// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::executor::error::ExecutorError;
use crate::executor::models::{
    ApiErrorDetail, InsertResult, QueryResult, Record, RequestOptions, UserContext,
};
use crate::executor::traits::QueryExecutor;

pub const DEFAULT_API_VERSION: &str = "59.0";

/// Query executor speaking the platform's REST API
#[derive(Debug, Clone)]
pub struct RestQueryExecutor {
    client: Client,
    api_version: String,
}

impl RestQueryExecutor {
    pub fn new(api_version: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("extreg/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_version,
        })
    }

    fn endpoint(
        &self,
        ctx: &UserContext,
        options: &RequestOptions,
        path: &str,
    ) -> Result<Url, ExecutorError> {
        let mut base = format!(
            "{}/services/data/v{}/",
            ctx.instance_url.trim_end_matches('/'),
            self.api_version
        );
        if options.tooling_api {
            base.push_str("tooling/");
        }

        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|source| ExecutorError::InvalidUrl {
                url: ctx.instance_url.clone(),
                source,
            })
    }

    fn authorize(&self, request: RequestBuilder, ctx: &UserContext) -> RequestBuilder {
        request
            .bearer_auth(&ctx.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

/// Build an `Api` error from a non-success response body.
/// The platform reports failures as a JSON array of error details.
fn api_error(status: StatusCode, body: &str) -> ExecutorError {
    let message = match serde_json::from_str::<Vec<ApiErrorDetail>>(body) {
        Ok(details) if !details.is_empty() => details
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
        _ if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        _ => body.trim().to_string(),
    };

    ExecutorError::Api {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl QueryExecutor for RestQueryExecutor {
    async fn query(
        &self,
        statement: &str,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<QueryResult, ExecutorError> {
        let mut url = self.endpoint(ctx, options, "query")?;
        url.query_pairs_mut().append_pair("q", statement);

        debug!(user = %ctx.username, tooling = options.tooling_api, statement, "Running query");

        let response = self.authorize(self.client.get(url), ctx).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, user = %ctx.username, "Query rejected by remote API");
            return Err(api_error(status, &body));
        }

        let result: QueryResult = serde_json::from_str(&body)?;
        debug!(total_size = result.total_size, "Query completed");
        Ok(result)
    }

    async fn insert(
        &self,
        table: &str,
        fields: &Record,
        ctx: &UserContext,
        options: &RequestOptions,
    ) -> Result<InsertResult, ExecutorError> {
        let url = self.endpoint(ctx, options, &format!("sobjects/{}", table))?;

        debug!(user = %ctx.username, table, "Inserting record");

        let response = self
            .authorize(self.client.post(url), ctx)
            .json(fields)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // A refused row comes back as 400 with the reasons; anything else
        // means the call itself failed.
        if status == StatusCode::BAD_REQUEST {
            if let Ok(errors) = serde_json::from_str::<Vec<ApiErrorDetail>>(&body) {
                warn!(table, user = %ctx.username, count = errors.len(), "Insert refused by remote API");
                return Ok(InsertResult::rejected(errors));
            }
        }

        Err(api_error(status, &body))
    }
}
