use serde::{Deserialize, Serialize};

use super::sealed::Build;
use super::FromWire;
use crate::error::Result;
use crate::validator::{string_field, WireRecord};

/// An Asana workspace or organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub gid: String,
    pub name: String,
}

impl FromWire for Workspace {
    const REQUIRED_KEYS: &'static [&'static str] = &["gid", "name"];
}

impl Build for Workspace {
    fn build(record: &WireRecord) -> Result<Self> {
        Ok(Self {
            gid: string_field(record, "gid")?,
            name: string_field(record, "name")?,
        })
    }
}
