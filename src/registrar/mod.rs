// SPDX-License-Identifier: GPL-3.0-only
pub mod error;
pub mod models;
pub mod service;
pub mod soql;

pub use error::RegistrarError;
pub use models::{ClassReference, ExtensionRegistration, RegisteredExtension, Registration};
pub use service::Registrar;
