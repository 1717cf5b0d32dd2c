use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{DocumentNumber, Email, PersonName, PhoneNumber, TypeConstraintError};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Plain text password, kept out of debug output.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(TypeConstraintError::InvalidValue(format!(
                "password shorter than {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    #[serde(rename = "USUA_CORREO")]
    pub email: Email,
    /// Login accepts any non-empty password; the length rule is for sign up.
    #[serde(rename = "USUA_PASSWORD")]
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role_id: i32,
}

/// Self-service sign up of a pet owner.
#[derive(Clone, Debug, Serialize)]
pub struct Registration {
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
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RegisteredUser {
    #[serde(rename = "USUA_ID")]
    pub id: i32,
    #[serde(rename = "USUA_DOCUMENTO")]
    pub document: String,
    #[serde(rename = "USUA_NOMBRE", alias = "USUA_NOMBRES", default)]
    pub name: String,
    #[serde(rename = "USUA_CORREO")]
    pub email: String,
    #[serde(rename = "USUA_TELEFONO", default)]
    pub phone: String,
    #[serde(rename = "USUA_ESTADO", default)]
    pub status: Option<String>,
    #[serde(rename = "ROL_ID")]
    pub role_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_redacted_in_debug() {
        let password = Password::new("secreto123").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
        assert!(Password::new("corta").is_err());
    }

    #[test]
    fn decodes_login_response() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","userId":4,"nombre":"Laura","rol":2}"#,
        )
        .unwrap();

        assert_eq!(response.user_id, 4);
        assert_eq!(response.role_id, 2);
    }
}
