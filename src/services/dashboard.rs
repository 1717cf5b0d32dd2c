//! Services backing the dashboard.

use crate::domain::access::{Capability, Role};
use crate::dto::dashboard::DashboardData;
use crate::gateway::StatisticsGateway;
use crate::services::{ServiceError, ServiceResult, ensure_signed_in};
use crate::session::Session;

/// Builds the dashboard for the signed-in user. Statistics are only fetched
/// for roles allowed to see them.
pub async fn dashboard<G>(gateway: &G, session: &Session) -> ServiceResult<DashboardData>
where
    G: StatisticsGateway + ?Sized,
{
    ensure_signed_in(session)?;

    let user = session.user().ok_or(ServiceError::Unauthorized)?;
    let capabilities = session.capabilities();

    let statistics = if capabilities.contains(Capability::ViewStatistics) {
        let statistics = gateway.general_statistics().await.map_err(|err| {
            log::error!("Failed to load statistics: {err}");
            ServiceError::gateway(err, "Error al cargar las estadísticas")
        })?;
        Some(statistics)
    } else {
        None
    };

    Ok(DashboardData {
        user_name: user.name,
        role_label: Role::label_for(Some(user.role_id)),
        quick_actions: capabilities.quick_actions(),
        menu: capabilities.menu(),
        statistics,
    })
}
