mod employee;
mod material;
mod project;
mod work;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use employee::{Employee, EmployeeInput};
pub use material::{Material, MaterialInput};
pub use project::{Project, ProjectInput};
pub use work::{Work, WorkInput};

/// A backend collection that supports list/create/update/delete
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path, e.g. `/obras`
    const PATH: &'static str;
    /// Payload accepted by POST and PUT
    type Input: Serialize + Sync;
}

/// Body of the `/health` and `/health/db` probes
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub ok: bool,
}
