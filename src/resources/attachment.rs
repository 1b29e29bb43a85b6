use serde::{Deserialize, Serialize};

use super::sealed::Build;
use super::FromWire;
use crate::error::Result;
use crate::validator::{optional_string_field, string_field, WireRecord};

/// A file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub gid: Option<String>,
    /// File name as stored by the service.
    pub name: String,
}

impl FromWire for Attachment {
    const REQUIRED_KEYS: &'static [&'static str] = &["name"];
}

impl Build for Attachment {
    fn build(record: &WireRecord) -> Result<Self> {
        Ok(Self {
            gid: optional_string_field(record, "gid")?,
            name: string_field(record, "name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gid_is_optional() {
        let record = json!({"name": "logo.png"});

        let attachment = Attachment::from_wire(record.as_object().unwrap()).unwrap();

        assert_eq!(attachment.gid, None);
        assert_eq!(attachment.name, "logo.png");
    }

    #[test]
    fn name_is_required() {
        let record = json!({"gid": "5"});

        assert!(Attachment::from_wire(record.as_object().unwrap()).is_err());
    }
}
