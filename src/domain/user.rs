use serde::{Deserialize, Serialize};

use crate::domain::access::Role;
use crate::domain::auth::Password;
use crate::domain::types::{DocumentNumber, Email, PersonName, PhoneNumber, UserId};

/// Filter keys of `/auth/admin/listar`.
pub const FILTER_ROLE: &str = "rol";
pub const FILTER_SEARCH: &str = "busqueda";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    /// Raw role id; roles unknown to this client are kept as-is.
    #[serde(rename = "rol")]
    pub role_id: i32,
    #[serde(rename = "estado")]
    pub active: bool,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::try_from(self.role_id).ok()
    }
}

/// Account created by an administrator.
#[derive(Clone, Debug, Serialize)]
pub struct NewUser {
    #[serde(rename = "USUA_DOCUMENTO")]
    pub document: DocumentNumber,
    #[serde(rename = "USUA_NOMBRES")]
    pub name: PersonName,
    #[serde(rename = "USUA_CORREO")]
    pub email: Email,
    #[serde(rename = "USUA_PASSWORD")]
    pub password: Password,
    #[serde(rename = "USUA_TELEFONO")]
    pub phone: PhoneNumber,
    #[serde(rename = "ROL_ID")]
    pub role: Role,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UpdateUser {
    #[serde(rename = "documento")]
    pub document: DocumentNumber,
    #[serde(rename = "nombres")]
    pub name: PersonName,
    #[serde(rename = "correo")]
    pub email: Email,
    #[serde(rename = "telefono")]
    pub phone: PhoneNumber,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "estado")]
    pub active: bool,
}
