//! Typed resources and their wire-format transforms.
//!
//! Every resource is built from a [`WireRecord`] through [`FromWire`],
//! which checks required keys before any value is read. Raw records never
//! leave this layer.

mod attachment;
mod project;
mod task;
mod user;
mod workspace;

pub use attachment::Attachment;
pub use project::Project;
pub use task::Task;
pub use user::User;
pub use workspace::Workspace;

use crate::error::Result;
use crate::validator::{assert_keys_present, WireRecord};

pub(crate) mod sealed {
    use crate::error::Result;
    use crate::validator::WireRecord;

    /// Construction from a record whose required keys are known to exist.
    /// Unreachable from outside the crate, so [`super::FromWire::from_wire`]
    /// is the only entry point.
    pub trait Build: Sized {
        fn build(record: &WireRecord) -> Result<Self>;
    }
}

/// Conversion from a wire record into a validated resource.
///
/// Implemented only by the resources in this module.
///
/// ```compile_fail
/// use asana_client::resources::{FromWire, Task};
///
/// // Construction without the required-key check is not exposed.
/// let _ = Task::build(&Default::default());
/// ```
pub trait FromWire: sealed::Build {
    /// Keys that must be present before construction is attempted.
    const REQUIRED_KEYS: &'static [&'static str];

    fn from_wire(record: &WireRecord) -> Result<Self> {
        assert_keys_present(record, Self::REQUIRED_KEYS)?;
        Self::build(record)
    }
}
