//! Sign in, sign up and sign out.

use crate::domain::auth::{Credentials, RegisteredUser, Registration};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::gateway::AuthGateway;
use crate::gateway::errors::CONNECTION_ERROR;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{Session, SessionUser};

const REGISTER_ERROR: &str = "Error al registrar el usuario";

/// Validates the credentials, signs in and stores the token in the session.
pub async fn login<G>(gateway: &G, session: &Session, form: LoginForm) -> ServiceResult<SessionUser>
where
    G: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form)?;

    let response = gateway.login(&credentials).await.map_err(|err| {
        log::error!("Failed to sign in {}: {err}", credentials.email);
        ServiceError::gateway(err, CONNECTION_ERROR)
    })?;

    let stored = session.sign_in(response)?;
    Ok(stored.user)
}

/// Creates a pet-owner account. Does not sign in.
pub async fn register<G>(gateway: &G, form: RegisterForm) -> ServiceResult<RegisteredUser>
where
    G: AuthGateway + ?Sized,
{
    let registration = Registration::try_from(form)?;

    gateway.register(&registration).await.map_err(|err| {
        log::error!("Failed to register user: {err}");
        ServiceError::gateway(err, REGISTER_ERROR)
    })
}

/// Drops the stored session.
pub fn logout(session: &Session) -> ServiceResult<()> {
    session.sign_out()?;
    log::info!("Signed out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::LoginResponse;
    use crate::gateway::errors::GatewayError;
    use crate::gateway::mock::MockGateway;

    fn login_form() -> LoginForm {
        LoginForm {
            email: "ana@clinica.co".into(),
            password: "secreto".into(),
        }
    }

    #[tokio::test]
    async fn login_stores_session() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_login()
            .withf(|credentials| credentials.email.as_str() == "ana@clinica.co")
            .times(1)
            .returning(|_| {
                Ok(LoginResponse {
                    token: "jwt".into(),
                    user_id: 2,
                    name: "Ana".into(),
                    role_id: 2,
                })
            });
        let session = Session::in_memory();

        let user = login(&gateway, &session, login_form()).await.unwrap();

        assert_eq!(user.name, "Ana");
        assert_eq!(session.token().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_gateway() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().never();
        let form = LoginForm {
            email: "ana".into(),
            ..login_form()
        };

        let err = login(&gateway, &Session::in_memory(), form).await.unwrap_err();

        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[tokio::test]
    async fn rejected_login_shows_server_message() {
        let mut gateway = MockGateway::new();
        gateway.expect_login().returning(|_| {
            Err(GatewayError::Unauthorized(Some("Credenciales inválidas".into())))
        });
        let session = Session::in_memory();

        let err = login(&gateway, &session, login_form()).await.unwrap_err();

        assert_eq!(err.user_message(), Some("Credenciales inválidas"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn unreachable_server_uses_connection_message() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_login()
            .returning(|_| Err(GatewayError::Transport("connection refused".into())));

        let err = login(&gateway, &Session::in_memory(), login_form())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), Some(CONNECTION_ERROR));
    }

    #[test]
    fn logout_clears_token() {
        let session = crate::services::test_support::signed_in(1);
        logout(&session).unwrap();
        assert!(session.token().is_none());
    }
}
