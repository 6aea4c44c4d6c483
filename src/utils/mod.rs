// SPDX-License-Identifier: GPL-3.0-only
pub mod instance_url;

pub use instance_url::normalize_instance_url;
