use serde_json::Value;
use thiserror::Error;

/// Fallback of operations that have no resource-specific message.
pub const CONNECTION_ERROR: &str = "Error de conexión con el servidor";
pub const SESSION_EXPIRED: &str = "Sesión expirada, inicie sesión nuevamente";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GatewayError {
    /// The API answered 401. The session has already been cleared.
    #[error("Unauthorized")]
    Unauthorized(Option<String>),

    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    /// The resource does not offer this operation; nothing was sent.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// First human readable message of an error body: `{ error }`, then
/// `{ errors: [{ msg }] }`, then `{ message }`. Fields of any other shape
/// are skipped.
pub fn parse_error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    text(parsed.get("error"))
        .or_else(|| {
            parsed
                .get("errors")
                .and_then(Value::as_array)?
                .iter()
                .find_map(|item| text(item.get("msg")))
        })
        .or_else(|| text(parsed.get("message")))
}

impl GatewayError {
    /// Classifies a non-success response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = parse_error_message(body);
        if status == 401 {
            return GatewayError::Unauthorized(message);
        }
        GatewayError::Server { status, message }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Server { message, .. } | GatewayError::Unauthorized(message) => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// The single message a user sees for this failure.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Unauthorized(message) => message
                .clone()
                .unwrap_or_else(|| SESSION_EXPIRED.to_string()),
            GatewayError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            GatewayError::Server { message: None, .. }
            | GatewayError::Transport(_)
            | GatewayError::Decode(_)
            | GatewayError::Unsupported(_) => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field() {
        let body = r#"{"error":"La especie ya existe","errors":[{"msg":"otro"}]}"#;
        assert_eq!(parse_error_message(body).as_deref(), Some("La especie ya existe"));
    }

    #[test]
    fn falls_back_to_first_validation_message() {
        let body = r#"{"errors":[{"msg":"Correo ya registrado"},{"msg":"Documento inválido"}]}"#;
        assert_eq!(parse_error_message(body).as_deref(), Some("Correo ya registrado"));
    }

    #[test]
    fn odd_fields_do_not_hide_usable_message() {
        assert_eq!(
            parse_error_message(r#"{"error":"x","errors":null}"#).as_deref(),
            Some("x")
        );
        let body = r#"{"errors":[{"msg":42},{"msg":"Mascota no encontrada"}]}"#;
        assert_eq!(parse_error_message(body).as_deref(), Some("Mascota no encontrada"));
        let body = r#"{"error":{"code":7},"errors":"bad","message":"Sin permisos"}"#;
        assert_eq!(parse_error_message(body).as_deref(), Some("Sin permisos"));
        assert_eq!(parse_error_message(r#"["x"]"#), None);
    }

    #[test]
    fn non_json_body_has_no_message() {
        assert_eq!(parse_error_message("<html>502</html>"), None);
        assert_eq!(parse_error_message(r#"{"error":"  "}"#), None);
    }

    #[test]
    fn unauthorized_keeps_server_message() {
        let err = GatewayError::from_response(401, r#"{"error":"Token inválido"}"#);
        assert_eq!(err, GatewayError::Unauthorized(Some("Token inválido".into())));
        assert_eq!(
            GatewayError::from_response(401, "").user_message("x"),
            SESSION_EXPIRED
        );
    }

    #[test]
    fn user_message_uses_server_text_or_fallback() {
        let with_message = GatewayError::from_response(409, r#"{"error":"Duplicada"}"#);
        let without = GatewayError::from_response(500, "");

        assert_eq!(with_message.user_message("Error al crear especie"), "Duplicada");
        assert_eq!(without.user_message("Error al crear especie"), "Error al crear especie");
        assert_eq!(
            GatewayError::Transport("refused".into()).user_message(CONNECTION_ERROR),
            CONNECTION_ERROR
        );
    }
}
