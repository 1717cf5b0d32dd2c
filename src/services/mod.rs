//! Page-level workflows built on top of the gateway and the session.
//!
//! Every service checks the signed-in user's capabilities before the first
//! network call and turns gateway failures into a single user-facing message.

use thiserror::Error;

use crate::domain::access::{Capability, Role};
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::gateway::errors::GatewayError;
use crate::session::{Session, SessionError};

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod history;
pub mod pets;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not signed in")]
    Unauthorized,

    #[error("Operation not allowed for the current role")]
    Forbidden,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Invalid value: {0}")]
    TypeConstraint(String),

    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Wraps a gateway failure with the message the user should see.
    pub fn gateway(source: GatewayError, fallback: &str) -> Self {
        ServiceError::Gateway {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn user_message(&self) -> Option<&str> {
        match self {
            ServiceError::Gateway { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

/// Fails unless a user is signed in and their role grants `capability`.
pub fn ensure_capability(session: &Session, capability: Capability) -> ServiceResult<()> {
    if !session.is_authenticated() {
        return Err(ServiceError::Unauthorized);
    }
    if !session.capabilities().contains(capability) {
        let role = Role::label_for(session.user().map(|u| u.role_id));
        log::warn!("Role {role} lacks capability {capability:?}");
        return Err(ServiceError::Forbidden);
    }
    Ok(())
}

/// Fails unless a user is signed in.
pub fn ensure_signed_in(session: &Session) -> ServiceResult<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::auth::LoginResponse;
    use crate::session::Session;

    /// In-memory session signed in with `role_id`.
    pub fn signed_in(role_id: i32) -> Session {
        let session = Session::in_memory();
        session
            .sign_in(LoginResponse {
                token: "tok".into(),
                user_id: 4,
                name: "Lucía".into(),
                role_id,
            })
            .unwrap();
        session
    }
}
