use serde::{Deserialize, Serialize};

use super::sealed::Build;
use super::FromWire;
use crate::error::Result;
use crate::validator::{optional_string_field, string_field, WireRecord};

/// The user the access token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub gid: String,
    pub name: String,
    pub email: Option<String>,
}

impl FromWire for User {
    const REQUIRED_KEYS: &'static [&'static str] = &["gid", "name"];
}

impl Build for User {
    fn build(record: &WireRecord) -> Result<Self> {
        Ok(Self {
            gid: string_field(record, "gid")?,
            name: string_field(record, "name")?,
            email: optional_string_field(record, "email")?,
        })
    }
}
