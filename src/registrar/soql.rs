// SPDX-License-Identifier: GPL-3.0-only
//! SOQL statements issued by the registrar.

/// Table holding extension registrations
pub const REGISTRATION_TABLE: &str = "RegisteredExternalService";

/// Columns returned by the registration read-back
pub const REGISTRATION_FIELDS: &[&str] = &[
    "Id",
    "ConfigUrl",
    "DeveloperName",
    "DocumentationUrl",
    "ExtensionPointName",
    "ExternalServiceProviderId",
    "ExternalServiceProviderType",
    "Language",
    "MasterLabel",
    "NamespacePrefix",
];

/// Entity/field pair whose picklist holds the valid extension point names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicklistScope {
    pub entity: String,
    pub field: String,
}

impl PicklistScope {
    pub fn new(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// `EntityParticle.DurableId` of the field, e.g. "RegisteredExternalService.ExtensionPointName"
    pub fn durable_id(&self) -> String {
        format!("{}.{}", self.entity, self.field)
    }
}

impl Default for PicklistScope {
    fn default() -> Self {
        Self::new(REGISTRATION_TABLE, "ExtensionPointName")
    }
}

/// Escape a value for use inside a single-quoted SOQL literal
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn apex_class_lookup(class_name: &str) -> String {
    format!(
        "SELECT Id FROM ApexClass WHERE Name='{}' LIMIT 1",
        escape_literal(class_name)
    )
}

pub fn extension_point_lookup(extension_point: &str, scope: &PicklistScope) -> String {
    format!(
        "SELECT Value FROM PicklistValueInfo WHERE Value='{}' AND EntityParticle.DurableId = '{}' LIMIT 1",
        escape_literal(extension_point),
        escape_literal(&scope.durable_id())
    )
}

pub fn registration_lookup(developer_name: &str) -> String {
    format!(
        "SELECT {} from {} WHERE DeveloperName='{}'",
        REGISTRATION_FIELDS.join(","),
        REGISTRATION_TABLE,
        escape_literal(developer_name)
    )
}
