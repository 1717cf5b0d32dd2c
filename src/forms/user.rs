use serde::Deserialize;
use validator::Validate;

use crate::domain::access::Role;
use crate::domain::auth::Password;
use crate::domain::types::{DocumentNumber, Email, PersonName, PhoneNumber};
use crate::domain::user::{NewUser, UpdateUser};
use crate::forms::{FormError, valid_document, valid_phone};

pub const MIN_NAME_LENGTH: u64 = 5;

/// Administrator form for creating or editing a clinic user.
///
/// `password` is only read on create; an edit never changes the password.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct UserForm {
    #[validate(custom(
        function = "valid_document",
        message = "Documento no válido (solo números)"
    ))]
    pub document: String,
    #[validate(length(min = 5, message = "Mínimo 5 caracteres"))]
    pub name: String,
    #[validate(email(message = "Correo electrónico no válido"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[validate(custom(function = "valid_phone", message = "Teléfono debe tener 10 dígitos"))]
    pub phone: String,
    #[validate(range(min = 1, max = 3, message = "Rol no válido"))]
    pub role_id: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserForm {
    fn role(&self) -> Result<Role, FormError> {
        Role::try_from(self.role_id).map_err(|_| FormError::invalid("role_id", "Rol no válido"))
    }

    fn identity(&self) -> Result<(DocumentNumber, PersonName, Email, PhoneNumber), FormError> {
        let document = DocumentNumber::new(self.document.as_str())
            .map_err(|_| FormError::invalid("document", "Documento no válido (solo números)"))?;
        let name = PersonName::new(self.name.as_str())
            .map_err(|_| FormError::invalid("name", "Nombres son requeridos"))?;
        if name.chars().count() < MIN_NAME_LENGTH as usize {
            return Err(FormError::invalid("name", "Mínimo 5 caracteres"));
        }
        let email = Email::new(self.email.as_str())
            .map_err(|_| FormError::invalid("email", "Correo electrónico no válido"))?;
        let phone = PhoneNumber::new(self.phone.as_str())
            .map_err(|_| FormError::invalid("phone", "Teléfono debe tener 10 dígitos"))?;
        Ok((document, name, email, phone))
    }
}

impl TryFrom<UserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let password = Password::new(form.password.as_str()).map_err(|_| {
            FormError::invalid("password", "Mínimo 6 caracteres")
        })?;
        let role = form.role()?;
        let (document, name, email, phone) = form.identity()?;

        Ok(NewUser {
            document,
            name,
            email,
            password,
            phone,
            role,
        })
    }
}

impl TryFrom<UserForm> for UpdateUser {
    type Error = FormError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let role = form.role()?;
        let (document, name, email, phone) = form.identity()?;

        Ok(UpdateUser {
            document,
            name,
            email,
            phone,
            role,
            active: form.active,
        })
    }
}
