// SPDX-License-Identifier: GPL-3.0-only
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::executor::Record;

/// Provider type written on every registration created here
pub const PROVIDER_TYPE_EXTENSION: &str = "Extension";

/// Resolved identifier of a deployed Apex class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReference {
    pub name: String,
    pub id: String,
}

/// Row to be inserted into the registration table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtensionRegistration {
    /// Unique API name of the registration
    pub developer_name: String,

    /// Display label, always equal to the developer name
    pub master_label: String,

    /// Picklist value naming the extension point
    pub extension_point_name: String,

    /// Id of the Apex class providing the implementation
    #[serde(rename = "ExternalServiceProviderId")]
    pub provider_id: String,

    #[serde(rename = "ExternalServiceProviderType")]
    pub provider_type: String,
}

impl ExtensionRegistration {
    pub fn new(name: &str, extension_point_name: &str, provider: &ClassReference) -> Self {
        Self {
            developer_name: name.to_string(),
            master_label: name.to_string(),
            extension_point_name: extension_point_name.to_string(),
            provider_id: provider.id.clone(),
            provider_type: PROVIDER_TYPE_EXTENSION.to_string(),
        }
    }

    /// Field assignments sent with the insert
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("DeveloperName".to_string(), Value::from(self.developer_name.as_str()));
        record.insert("MasterLabel".to_string(), Value::from(self.master_label.as_str()));
        record.insert(
            "ExtensionPointName".to_string(),
            Value::from(self.extension_point_name.as_str()),
        );
        record.insert(
            "ExternalServiceProviderId".to_string(),
            Value::from(self.provider_id.as_str()),
        );
        record.insert(
            "ExternalServiceProviderType".to_string(),
            Value::from(self.provider_type.as_str()),
        );
        record
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Id of the newly created registration row
    pub id: String,
    pub registration: ExtensionRegistration,
    pub registered_at: DateTime<Utc>,
}

/// Registration row as stored on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisteredExtension {
    pub id: String,
    #[serde(default)]
    pub config_url: Option<String>,
    pub developer_name: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
    #[serde(default)]
    pub extension_point_name: Option<String>,
    #[serde(default)]
    pub external_service_provider_id: Option<String>,
    #[serde(default)]
    pub external_service_provider_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub master_label: Option<String>,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
}
