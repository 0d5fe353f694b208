//! HTTP handlers for auth endpoints.

use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::application::handlers::{CheckSessionQuery, LoginCommand};
use crate::domain::checkout::{AuthorizationCode, CheckoutError};

use super::super::error::ApiError;
use super::super::session_cookie::{session_cookie, session_id_from};
use super::super::state::AppState;
use super::dto::{LoginRequest, LoginResponse, AUTHORIZATION_CODE_FIELD, SESSION_ALIVE, SESSION_EXPIRED};

/// Login form body, urlencoded or `multipart/form-data`.
pub struct LoginForm(pub LoginRequest);

#[async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(request) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| CheckoutError::request_format(format!("Invalid form body: {}", e)))?;
            return Ok(Self(request));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| CheckoutError::request_format(format!("Invalid form body: {}", e)))?;
        let mut authorization_code = None;
        while let Some(field) = multipart.next_field().await.map_err(malformed_multipart)? {
            if field.name() == Some(AUTHORIZATION_CODE_FIELD) {
                authorization_code = Some(field.text().await.map_err(malformed_multipart)?);
                break;
            }
        }
        Ok(Self(LoginRequest { authorization_code }))
    }
}

fn malformed_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    CheckoutError::request_format(format!("Invalid multipart body: {}", e.body_text())).into()
}

/// POST /api/auth/login - Exchange an authorization code and attest the identity
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    LoginForm(request): LoginForm,
) -> Result<impl IntoResponse, ApiError> {
    let code = request
        .authorization_code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| CheckoutError::request_format("Authorization code is required"))?;

    let cmd = LoginCommand {
        session_id: session_id_from(&jar, &state.session_cookie),
        authorization_code: AuthorizationCode::new(code),
    };
    let result = state.login_handler().handle(cmd).await?;

    let jar = jar.add(session_cookie(&state.session_cookie, &result.session));
    Ok((jar, Json(LoginResponse::from(result.attestation))))
}

/// GET /api/auth/checksession - Report whether the session holds a token
pub async fn check_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let query = CheckSessionQuery {
        session_id: session_id_from(&jar, &state.session_cookie),
    };
    let status = state.check_session_handler().handle(query).await?;

    Ok(if status.is_alive() {
        SESSION_ALIVE
    } else {
        SESSION_EXPIRED
    })
}
