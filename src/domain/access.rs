//! Roles, the capabilities they resolve to and the routes they unlock.
//!
//! A [`Role`] is resolved into a [`CapabilitySet`] once, when the session is
//! read, and the rest of the crate consumes the set as data instead of
//! comparing numeric role identifiers.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Clinic role as encoded by the API (`rol` / `ROL_ID`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    Administrator,
    Veterinarian,
    Client,
}

impl Role {
    pub const fn id(self) -> i32 {
        match self {
            Role::Administrator => 1,
            Role::Veterinarian => 2,
            Role::Client => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Veterinarian => "Veterinario",
            Role::Client => "Cliente",
        }
    }

    /// Label for a raw role id, including ids this client does not know.
    pub fn label_for(raw: Option<i32>) -> &'static str {
        raw.and_then(|id| Role::try_from(id).ok())
            .map_or("Usuario", Role::label)
    }

    pub fn capabilities(self) -> CapabilitySet {
        use Capability::*;
        let capabilities: &[Capability] = match self {
            Role::Administrator => &[
                ManageUsers,
                ManageSpecies,
                RegisterPet,
                BookAppointment,
                ManageAppointments,
                MedicalHistory,
                ViewStatistics,
            ],
            Role::Veterinarian => &[ManageSpecies, ManageAppointments, MedicalHistory],
            Role::Client => &[RegisterPet, BookAppointment],
        };
        CapabilitySet(capabilities.to_vec())
    }
}

impl TryFrom<i32> for Role {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Administrator),
            2 => Ok(Role::Veterinarian),
            3 => Ok(Role::Client),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role {other}"
            ))),
        }
    }
}

impl From<Role> for i32 {
    fn from(value: Role) -> Self {
        value.id()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Something a signed-in user is allowed to do.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageUsers,
    ManageSpecies,
    RegisterPet,
    BookAppointment,
    ManageAppointments,
    MedicalHistory,
    ViewStatistics,
}

impl Capability {
    /// The page a capability opens, `None` for capabilities without a page.
    pub fn route(self) -> Option<Route> {
        match self {
            Capability::ManageUsers => Some(Route::ManageUsers),
            Capability::ManageSpecies => Some(Route::ManageSpecies),
            Capability::RegisterPet => Some(Route::RegisterPet),
            Capability::BookAppointment => Some(Route::BookAppointment),
            Capability::ManageAppointments => Some(Route::ManageAppointments),
            Capability::MedicalHistory => Some(Route::MedicalHistory),
            Capability::ViewStatistics => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Capability::ManageUsers => "Gestionar Usuarios",
            Capability::ManageSpecies => "Crear Especie",
            Capability::RegisterPet => "Registrar Mascota",
            Capability::BookAppointment => "Crear Cita",
            Capability::ManageAppointments => "Gestionar Citas",
            Capability::MedicalHistory => "Historial Médico",
            Capability::ViewStatistics => "Estadísticas",
        }
    }
}

/// Application pages.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    RegisterPet,
    ManageUsers,
    ManageSpecies,
    BookAppointment,
    ManageAppointments,
    MedicalHistory,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::RegisterPet,
        Route::ManageUsers,
        Route::ManageSpecies,
        Route::BookAppointment,
        Route::ManageAppointments,
        Route::MedicalHistory,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::RegisterPet => "/register-pet",
            Route::ManageUsers => "/register-vet",
            Route::ManageSpecies => "/create-species",
            Route::BookAppointment => "/create-appointment",
            Route::ManageAppointments => "/manage-appointments",
            Route::MedicalHistory => "/medical-history",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Public pages render without a session token.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Entry of the navigation menu.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    /// `None` for the sign-out entry.
    pub route: Option<Route>,
}

pub const SIGN_OUT_LABEL: &str = "Cerrar Sesión";

/// Permissions resolved from a role, in menu order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(Vec<Capability>);

impl CapabilitySet {
    /// Set for a raw role id; unknown or missing roles get no capabilities.
    pub fn for_role(raw: Option<i32>) -> Self {
        raw.and_then(|id| Role::try_from(id).ok())
            .map(Role::capabilities)
            .unwrap_or_default()
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Whether a signed-in user holding this set may open `route`.
    pub fn allows(&self, route: Route) -> bool {
        if !route.requires_auth() || route == Route::Dashboard {
            return true;
        }
        self.iter().any(|capability| capability.route() == Some(route))
    }

    /// Dashboard shortcuts.
    pub fn quick_actions(&self) -> Vec<NavEntry> {
        self.iter()
            .filter_map(|capability| {
                capability.route().map(|route| NavEntry {
                    label: capability.label(),
                    route: Some(route),
                })
            })
            .collect()
    }

    /// Navigation menu, sign-out always last.
    pub fn menu(&self) -> Vec<NavEntry> {
        let mut entries = self.quick_actions();
        entries.push(NavEntry {
            label: SIGN_OUT_LABEL,
            route: None,
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(entries: &[NavEntry]) -> Vec<&'static str> {
        entries.iter().map(|entry| entry.label).collect()
    }

    #[test]
    fn administrator_menu_lists_everything() {
        let set = Role::Administrator.capabilities();

        assert_eq!(
            labels(&set.menu()),
            vec![
                "Gestionar Usuarios",
                "Crear Especie",
                "Registrar Mascota",
                "Crear Cita",
                "Gestionar Citas",
                "Historial Médico",
                SIGN_OUT_LABEL,
            ]
        );
    }

    #[test]
    fn veterinarian_cannot_manage_users() {
        let set = CapabilitySet::for_role(Some(2));

        assert!(set.contains(Capability::ManageAppointments));
        assert!(!set.contains(Capability::ManageUsers));
        assert!(!set.allows(Route::ManageUsers));
        assert!(set.allows(Route::MedicalHistory));
    }

    #[test]
    fn client_sees_pet_and_booking_actions() {
        let set = CapabilitySet::for_role(Some(3));

        assert_eq!(
            labels(&set.quick_actions()),
            vec!["Registrar Mascota", "Crear Cita"]
        );
    }

    #[test]
    fn unknown_role_only_signs_out() {
        let set = CapabilitySet::for_role(Some(9));

        assert!(set.is_empty());
        assert_eq!(labels(&set.menu()), vec![SIGN_OUT_LABEL]);
        assert!(set.allows(Route::Dashboard));
        assert!(!set.allows(Route::RegisterPet));
        assert_eq!(Role::label_for(Some(9)), "Usuario");
    }

    #[test]
    fn routes_round_trip_through_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert!(!Route::Login.requires_auth());
        assert!(Route::ManageSpecies.requires_auth());
    }
}
