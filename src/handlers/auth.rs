use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{
    names,
    rejections::{AppError, ResultExt},
    services::auth::{LoginOutcome, RegisterOutcome},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

#[derive(Deserialize)]
struct CredentialsBody {
    email: String,
    password: String,
}

async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .auth
        .register(&body.email, &body.password)
        .await
        .reject("could not register user")?;

    match outcome {
        RegisterOutcome::LoggedIn { user_id, session } => {
            let mut headers = HeaderMap::new();
            headers.insert(
                SET_COOKIE,
                names::cookie(names::USER_SESSION_COOKIE_NAME, &session)
                    .parse()
                    .map_err(|_| AppError::Internal("could not build session cookie"))?,
            );

            Ok((
                StatusCode::CREATED,
                headers,
                Json(json!({ "userId": user_id })),
            ))
        }
        RegisterOutcome::EmptyFields => Err(AppError::Input("email and password are required")),
        RegisterOutcome::WeakPassword => {
            Err(AppError::Input("password must be at least 8 characters"))
        }
        RegisterOutcome::EmailTaken => Err(AppError::Input("email is already in use")),
    }
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .auth
        .login(&body.email, &body.password)
        .await
        .reject("could not log in")?;

    match outcome {
        LoginOutcome::Success(session) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                SET_COOKIE,
                names::cookie(names::USER_SESSION_COOKIE_NAME, &session)
                    .parse()
                    .map_err(|_| AppError::Internal("could not build session cookie"))?,
            );

            Ok((headers, Json(json!({ "message": "logged in" }))))
        }
        LoginOutcome::InvalidCredentials => Err(AppError::Unauthorized),
    }
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session) = jar.get(names::USER_SESSION_COOKIE_NAME) {
        state
            .auth
            .logout(session.value())
            .await
            .reject("could not log out")?;
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        names::clear_cookie(names::USER_SESSION_COOKIE_NAME)
            .parse()
            .map_err(|_| AppError::Internal("could not build session cookie"))?,
    );

    Ok((headers, Json(json!({ "message": "logged out" }))))
}
