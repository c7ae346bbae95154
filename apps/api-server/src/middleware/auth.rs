//! Bearer-token identity extractor.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode,
    http::header, web,
};
use std::fmt;
use std::future::{Ready, ready};
use std::sync::Arc;

use blog_core::ports::{AuthError, TokenClaims, TokenService};
use blog_shared::ErrorResponse;

/// Authenticated user identity extractor.
///
/// Any handler taking an `Identity` rejects unauthenticated requests with 401
/// before its body runs:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                tracing::debug!(reason = %msg, "Rejected bearer token");
                ErrorResponse::new(401, "Invalid Token")
                    .with_detail("The provided bearer token is not valid.")
            }
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

fn reject(err: AuthError) -> Ready<Result<Identity, AuthenticationError>> {
    ready(Err(AuthenticationError(err)))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
            tracing::error!("TokenService not found in app data");
            return reject(AuthError::InvalidToken(
                "Server configuration error".to_string(),
            ));
        };

        let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
            return reject(AuthError::MissingAuth);
        };

        let Ok(auth_str) = auth_header.to_str() else {
            return reject(AuthError::InvalidToken(
                "Invalid authorization header".to_string(),
            ));
        };

        // Parse "Bearer <token>"
        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return reject(AuthError::InvalidToken("Expected Bearer token".to_string()));
        };

        match token_service.validate_token(token.trim()) {
            Ok(claims) => ready(Ok(Identity::from(claims))),
            Err(e) => reject(e),
        }
    }
}
