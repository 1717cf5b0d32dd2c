use serde::{Deserialize, Serialize};

/// Clinic-wide counters shown on the administrator dashboard.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    #[serde(rename = "usuarios")]
    pub users: u64,
    #[serde(rename = "mascotas")]
    pub pets: u64,
    #[serde(rename = "citas")]
    pub appointments: u64,
}
