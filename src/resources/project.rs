use serde::{Deserialize, Serialize};

use super::sealed::Build;
use super::FromWire;
use crate::error::Result;
use crate::validator::{string_field, WireRecord};

/// A project inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub gid: String,
    pub name: String,
}

impl FromWire for Project {
    const REQUIRED_KEYS: &'static [&'static str] = &["gid", "name"];
}

impl Build for Project {
    fn build(record: &WireRecord) -> Result<Self> {
        Ok(Self {
            gid: string_field(record, "gid")?,
            name: string_field(record, "name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsanaError;
    use serde_json::json;

    #[test]
    fn missing_gid_is_invalid_data() {
        let record = json!({"name": "Project"});

        assert!(matches!(
            Project::from_wire(record.as_object().unwrap()),
            Err(AsanaError::InvalidData { .. })
        ));
    }

    #[test]
    fn non_string_gid_is_invalid_data() {
        let record = json!({"gid": 10, "name": "Project"});

        assert!(matches!(
            Project::from_wire(record.as_object().unwrap()),
            Err(AsanaError::InvalidData { .. })
        ));
    }
}
