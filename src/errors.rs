use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Forbidden => StatusCode::FORBIDDEN,
                DomainError::InvalidCredential | DomainError::Expired => StatusCode::UNAUTHORIZED,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Opaque body; the real cause goes to the log only.
            log::error!("internal error: {}", self);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }));
        }
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;
    use crate::domain::status::OrderStatus;

    #[test]
    fn not_found_returns_404() {
        let err: AppError = DomainError::NotFound("Order").into();
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_returns_403() {
        let err: AppError = DomainError::Forbidden.into();
        assert_eq!(err.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn credential_failures_return_401() {
        for e in [DomainError::InvalidCredential, DomainError::Expired] {
            let err: AppError = e.into();
            assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn business_rule_failures_return_400() {
        let failures = [
            DomainError::NotAvailable("Red Velvet".to_string()),
            DomainError::InvalidQuantity,
            DomainError::InvalidRole("role".to_string()),
            DomainError::AlreadyAssigned,
            DomainError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            },
            DomainError::DuplicateEmail,
        ];
        for e in failures {
            let err: AppError = e.into();
            assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn internal_errors_return_opaque_500() {
        let err: AppError = DomainError::Internal("pool exhausted".to_string()).into();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_display_names_the_entity() {
        let err: AppError = DomainError::NotFound("Product").into();
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn transition_display_names_both_states() {
        let err: AppError = DomainError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid status transition from DELIVERED to PENDING"
        );
    }
}
