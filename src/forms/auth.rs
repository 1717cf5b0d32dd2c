use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{Credentials, Password, Registration};
use crate::domain::types::{DocumentNumber, Email, PersonName, PhoneNumber};
use crate::forms::{FormError, not_blank, valid_document, valid_phone};

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Correo electrónico no válido"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "La contraseña es requerida"))]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = Email::new(form.email)
            .map_err(|_| FormError::invalid("email", "Correo electrónico no válido"))?;
        Ok(Credentials {
            email,
            password: form.password,
        })
    }
}

/// Public sign up form. The server assigns the client role.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(custom(
        function = "valid_document",
        message = "Documento no válido (solo números)"
    ))]
    pub document: String,
    #[validate(length(min = 5, message = "Mínimo 5 caracteres"))]
    pub name: String,
    #[validate(email(message = "Correo electrónico no válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "Mínimo 6 caracteres"))]
    pub password: String,
    #[validate(custom(function = "valid_phone", message = "Teléfono debe tener 10 dígitos"))]
    pub phone: String,
}

impl TryFrom<RegisterForm> for Registration {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Registration {
            document: DocumentNumber::new(form.document).map_err(|_| {
                FormError::invalid("document", "Documento no válido (solo números)")
            })?,
            name: PersonName::new(form.name)
                .map_err(|_| FormError::invalid("name", "Nombres son requeridos"))?,
            email: Email::new(form.email)
                .map_err(|_| FormError::invalid("email", "Correo electrónico no válido"))?,
            password: Password::new(form.password)
                .map_err(|_| FormError::invalid("password", "Mínimo 6 caracteres"))?,
            phone: PhoneNumber::new(form.phone)
                .map_err(|_| FormError::invalid("phone", "Teléfono debe tener 10 dígitos"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_password() {
        let form = LoginForm {
            email: "vet@clinica.co".into(),
            password: " ".into(),
        };

        let err = Credentials::try_from(form).unwrap_err();
        assert_eq!(
            err.field_errors().get("password"),
            Some("La contraseña es requerida")
        );
    }

    #[test]
    fn login_normalizes_email() {
        let form = LoginForm {
            email: "Vet@Clinica.CO".into(),
            password: "x".into(),
        };

        let credentials = Credentials::try_from(form).unwrap();
        assert_eq!(credentials.email.as_str(), "vet@clinica.co");
    }

    #[test]
    fn registration_checks_password_length() {
        let form = RegisterForm {
            document: "123456".into(),
            name: "Carlos Ruiz".into(),
            email: "carlos@correo.com".into(),
            password: "12345".into(),
            phone: "3109876543".into(),
        };

        let err = Registration::try_from(form).unwrap_err();
        assert_eq!(err.field_errors().get("password"), Some("Mínimo 6 caracteres"));
    }
}
