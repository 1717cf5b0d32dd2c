//! DTOs used on the dashboard.

use serde::Serialize;

use crate::domain::access::NavEntry;
use crate::domain::statistics::Statistics;

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub user_name: String,
    pub role_label: &'static str,
    /// Shortcuts to the pages the role may open.
    pub quick_actions: Vec<NavEntry>,
    pub menu: Vec<NavEntry>,
    /// Only loaded for administrators.
    pub statistics: Option<Statistics>,
}
