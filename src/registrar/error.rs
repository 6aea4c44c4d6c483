// SPDX-License-Identifier: GPL-3.0-only
use crate::executor::ExecutorError;

#[derive(thiserror::Error, Debug)]
pub enum RegistrarError {
    /// The remote call itself failed; passed through untouched
    #[error(transparent)]
    Transport(#[from] ExecutorError),

    #[error("Invalid Apex class: no class named '{class_name}' exists in the org")]
    UnknownClass { class_name: String },

    #[error("Apex class '{class_name}' was found but the lookup returned no Id")]
    MissingClassId { class_name: String },

    #[error("Invalid extension point name: '{extension_point}' is not a value of {scope}")]
    UnknownExtensionPoint {
        extension_point: String,
        scope: String,
    },

    #[error("Failed to insert into {table}: {cause}")]
    Insert { table: String, cause: String },

    #[error("Invalid input: {field} must not be empty")]
    InvalidInput { field: &'static str },
}
