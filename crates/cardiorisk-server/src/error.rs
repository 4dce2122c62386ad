//! JSON error envelope returned by every failing route

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardiorisk_core::Error;
use serde_json::json;

/// Message returned while the provider runs on the stub
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Modelo de classificação não está operacional.";

/// Error handling
#[derive(Debug)]
pub enum ApiError {
    /// Failure from the prediction path
    Prediction(Error),
    /// No route matched
    NotFound(String),
    /// Handler panicked
    Internal(String),
}

impl ApiError {
    /// Status code and user-facing message
    pub fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Prediction(Error::ModelUnavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                MODEL_UNAVAILABLE_MESSAGE.to_string(),
            ),
            ApiError::Prediction(Error::Validation(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Dados do paciente inválidos: {}", msg),
            ),
            ApiError::Prediction(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro interno na previsão: {}", err),
            ),
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("Rota não encontrada: {}", path),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro interno na previsão: {}", msg),
            ),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Prediction(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "erro": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::model_unavailable("gone"), StatusCode::SERVICE_UNAVAILABLE),
            (Error::validation("missing field `age`"), StatusCode::UNPROCESSABLE_ENTITY),
            (Error::inference("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::artifact("bad"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).parts().0, status);
        }
    }

    #[test]
    fn test_messages() {
        let (_, msg) = ApiError::from(Error::model_unavailable("file not found")).parts();
        assert_eq!(msg, MODEL_UNAVAILABLE_MESSAGE);

        let (_, msg) = ApiError::from(Error::validation("missing field `age`")).parts();
        assert!(msg.ends_with("missing field `age`"));

        let (_, msg) = ApiError::from(Error::inference("boom")).parts();
        assert_eq!(msg, "Erro interno na previsão: boom");
    }
}
