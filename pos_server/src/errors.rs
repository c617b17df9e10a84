use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use pos_engine::{OrderFlowError, RestaurantApiError, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The payments platform could not complete the request. {0}")]
    GatewayError(String),
    #[error("The service is not ready. {0}")]
    ServiceUnavailable(String),
    /// A remote side effect happened but could not be recorded locally. Needs manual reconciliation.
    #[error("Partial failure. {0}")]
    PartialFailure(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GatewayError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PartialFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<RestaurantApiError> for ServerError {
    fn from(e: RestaurantApiError) -> Self {
        match e {
            RestaurantApiError::NotAuthenticated => Self::AuthenticationError(e.to_string()),
            RestaurantApiError::UpstreamUnavailable(_) => Self::AuthenticationError(e.to_string()),
            RestaurantApiError::StorageError(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidInput(s) => Self::InvalidRequestBody(s),
            OrderFlowError::OrderNotFound(id) => Self::NoRecordFound(format!("Order {id} does not exist")),
            OrderFlowError::StorageError(StorageError::OrderNotFound(id)) => {
                Self::NoRecordFound(format!("Order {id} does not exist"))
            },
            OrderFlowError::StorageError(e) => Self::BackendError(e.to_string()),
            OrderFlowError::GatewayError(e) => Self::GatewayError(e.to_string()),
            OrderFlowError::DanglingRemoteOrder { .. } | OrderFlowError::UnrecordedPayment { .. } => {
                error!("💻️ Returning a partial failure to the client. {e}");
                Self::PartialFailure(e.to_string())
            },
        }
    }
}
