//! The error type for talking to the finance API.

/// The ways a request to the finance API can fail.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response, e.g. the host is unreachable.
    #[error("no se pudo conectar con el servidor: {0}")]
    Network(String),

    /// The server answered with a non-2xx status code.
    #[error("Error HTTP: {status} ({url})")]
    Status { status: u16, url: String },

    /// The body was not the JSON shape we expected.
    #[error("respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(value: gloo_net::Error) -> Self {
        match value {
            gloo_net::Error::SerdeError(error) => ApiError::Decode(error.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_name_the_code_and_url() {
        let error = ApiError::Status {
            status: 502,
            url: "http://localhost:8000/incomes/2025/6".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Error HTTP: 502 (http://localhost:8000/incomes/2025/6)"
        );
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let serde_error = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error: ApiError = gloo_net::Error::SerdeError(serde_error).into();

        assert!(matches!(error, ApiError::Decode(_)));
    }
}
