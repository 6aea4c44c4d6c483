// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::executor::{QueryExecutor, RequestOptions, RestQueryExecutor, UserContext};
use crate::registrar::{RegisteredExtension, Registrar, Registration};
use crate::utils::normalize_instance_url;

#[derive(clap::Args, Debug)]
pub struct RegisterArgs {
    /// Developer name (and label) of the new registration
    #[arg(short = 'r', long)]
    pub registered_extension_name: String,

    /// Extension point the class will provide, e.g. "Commerce_Domain_Tax_CartCalculator"
    #[arg(short = 'e', long)]
    pub extension_point_name: String,

    /// Name of the deployed Apex class implementing the extension
    #[arg(short = 'a', long)]
    pub apex_class_name: String,

    /// Username of the target org session
    #[arg(short = 'u', long)]
    pub target_username: Option<String>,

    /// Instance URL of the target org
    #[arg(long)]
    pub instance_url: Option<String>,

    /// Access token of the target org session
    #[arg(long)]
    pub access_token: Option<String>,

    /// Send every call through the tooling API
    #[arg(long)]
    pub use_tooling_api: bool,

    /// Skip reading the stored registration back after the insert
    #[arg(long)]
    pub no_read_back: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct RegisterReport {
    pub registration: Registration,
    pub record: Option<RegisteredExtension>,
}

/// Build the session descriptor from flags, falling back to configuration
pub fn user_context(args: &RegisterArgs, config: &Config) -> anyhow::Result<UserContext> {
    let username = args
        .target_username
        .clone()
        .or_else(|| config.target_username.clone())
        .context("No target username given (use --target-username or EXTREG_TARGET_USERNAME)")?;

    let instance_url = args
        .instance_url
        .as_deref()
        .or(config.instance_url.as_deref())
        .context("No instance URL given (use --instance-url or EXTREG_INSTANCE_URL)")?;
    let instance_url = normalize_instance_url(instance_url)?;

    let access_token = args
        .access_token
        .clone()
        .or_else(|| config.access_token.clone())
        .context("No access token given (use --access-token or EXTREG_ACCESS_TOKEN)")?;

    Ok(UserContext::new(username, instance_url, access_token))
}

pub async fn run(args: RegisterArgs, config: &Config) -> anyhow::Result<RegisterReport> {
    let ctx = user_context(&args, config)?;

    let executor: Arc<dyn QueryExecutor> = Arc::new(RestQueryExecutor::new(
        config.api_version.clone(),
        config.request_timeout(),
    )?);
    let options = RequestOptions {
        tooling_api: args.use_tooling_api || config.use_tooling_api,
    };
    let registrar = Registrar::new(executor).with_options(options);

    let registration = registrar
        .register_apex(
            &args.registered_extension_name,
            &args.extension_point_name,
            &args.apex_class_name,
            &ctx,
        )
        .await?;

    // The row exists at this point; a failed read-back only loses the echo.
    let record = if args.no_read_back {
        None
    } else {
        match registrar
            .fetch_registration(&args.registered_extension_name, &ctx)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, id = %registration.id, "Could not read back registration");
                None
            }
        }
    };

    info!(id = %registration.id, "Registration complete");
    Ok(RegisterReport {
        registration,
        record,
    })
}

/// Human-readable summary of a report
pub fn render_summary(report: &RegisterReport) -> String {
    let registration = &report.registration.registration;
    let mut out = format!(
        "Registered extension '{}' (Id {})\n  Extension point: {}\n  Apex class Id:   {}\n  Provider type:   {}\n",
        registration.developer_name,
        report.registration.id,
        registration.extension_point_name,
        registration.provider_id,
        registration.provider_type,
    );
    if let Some(record) = &report.record {
        if let Some(namespace) = &record.namespace_prefix {
            out.push_str(&format!("  Namespace:       {}\n", namespace));
        }
        if let Some(language) = &record.language {
            out.push_str(&format!("  Language:        {}\n", language));
        }
    }
    out
}
