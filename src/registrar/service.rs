// SPDX-License-Identifier: GPL-3.0-only
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::executor::{QueryExecutor, RequestOptions, UserContext};
use crate::registrar::error::RegistrarError;
use crate::registrar::models::{
    ClassReference, ExtensionRegistration, RegisteredExtension, Registration,
};
use crate::registrar::soql::{self, PicklistScope, REGISTRATION_TABLE};

/// Registers Apex classes as extension providers.
///
/// Each registration is a strictly sequential check-then-act against the
/// remote store: resolve the class, validate the extension point, insert the
/// row. Nothing holds the class or picklist value in place between the checks
/// and the insert, so either may disappear in between; the insert is then
/// refused remotely and reported as [`RegistrarError::Insert`].
pub struct Registrar {
    executor: Arc<dyn QueryExecutor>,
    options: RequestOptions,
}

impl Registrar {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            options: RequestOptions::default(),
        }
    }

    /// Options forwarded with every remote call
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Register `class_name` as the provider of `extension_point_name` under `name`.
    ///
    /// At most one insert is issued, and only after both lookups succeed.
    /// No step is retried.
    pub async fn register_apex(
        &self,
        name: &str,
        extension_point_name: &str,
        class_name: &str,
        ctx: &UserContext,
    ) -> Result<Registration, RegistrarError> {
        require_non_empty("name", name)?;
        require_non_empty("extension point name", extension_point_name)?;
        require_non_empty("Apex class name", class_name)?;

        info!(
            name = %name,
            extension_point = %extension_point_name,
            class = %class_name,
            user = %ctx.username,
            "Registering extension"
        );

        let class_ref = self.resolve_class(class_name, ctx).await?;
        self.validate_extension_point(extension_point_name, ctx).await?;

        let registration = ExtensionRegistration::new(name, extension_point_name, &class_ref);
        let id = self.insert_registration(&registration, ctx).await?;

        info!(id = %id, name = %name, class = %class_ref.name, "Extension registered");
        Ok(Registration {
            id,
            registration,
            registered_at: chrono::Utc::now(),
        })
    }

    /// Look up the Id of the Apex class called `class_name`
    pub async fn resolve_class(
        &self,
        class_name: &str,
        ctx: &UserContext,
    ) -> Result<ClassReference, RegistrarError> {
        let statement = soql::apex_class_lookup(class_name);
        let result = self.executor.query(&statement, ctx, &self.options).await?;

        if !result.has_matches() {
            warn!(class = %class_name, "Apex class not found");
            return Err(RegistrarError::UnknownClass {
                class_name: class_name.to_string(),
            });
        }

        let id = result
            .first_str("Id")
            .ok_or_else(|| RegistrarError::MissingClassId {
                class_name: class_name.to_string(),
            })?;

        info!(class = %class_name, id = %id, "Resolved Apex class");
        Ok(ClassReference {
            name: class_name.to_string(),
            id: id.to_string(),
        })
    }

    /// Check that `extension_point_name` is a value of the registration picklist
    pub async fn validate_extension_point(
        &self,
        extension_point_name: &str,
        ctx: &UserContext,
    ) -> Result<(), RegistrarError> {
        let scope = PicklistScope::default();
        let statement = soql::extension_point_lookup(extension_point_name, &scope);
        let result = self.executor.query(&statement, ctx, &self.options).await?;

        if !result.has_matches() {
            warn!(
                extension_point = %extension_point_name,
                scope = %scope.durable_id(),
                "Extension point name not found"
            );
            return Err(RegistrarError::UnknownExtensionPoint {
                extension_point: extension_point_name.to_string(),
                scope: scope.durable_id(),
            });
        }

        Ok(())
    }

    async fn insert_registration(
        &self,
        registration: &ExtensionRegistration,
        ctx: &UserContext,
    ) -> Result<String, RegistrarError> {
        let fields = registration.to_record();
        let result = self
            .executor
            .insert(REGISTRATION_TABLE, &fields, ctx, &self.options)
            .await?;

        match result.id {
            Some(ref id) if result.success => Ok(id.clone()),
            _ => {
                let cause = result.error_summary();
                error!(
                    name = %registration.developer_name,
                    cause = %cause,
                    "Registration insert failed"
                );
                Err(RegistrarError::Insert {
                    table: REGISTRATION_TABLE.to_string(),
                    cause,
                })
            }
        }
    }

    /// Read back the stored registration row for `name`, if any
    pub async fn fetch_registration(
        &self,
        name: &str,
        ctx: &UserContext,
    ) -> Result<Option<RegisteredExtension>, RegistrarError> {
        let statement = soql::registration_lookup(name);
        let result = self.executor.query(&statement, ctx, &self.options).await?;

        match result.records.into_iter().next() {
            Some(record) => {
                let row = serde_json::from_value(serde_json::Value::Object(record))
                    .map_err(crate::executor::ExecutorError::from)?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), RegistrarError> {
    if value.trim().is_empty() {
        return Err(RegistrarError::InvalidInput { field });
    }
    Ok(())
}
