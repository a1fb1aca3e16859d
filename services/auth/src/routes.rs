//! Authentication service routes
//!
//! Registration, login, the session-gated dashboard, and logout. Browser
//! navigation outcomes are redirects carrying a short `notice` code in
//! the query string; the frontend turns those into user-visible messages.

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{error, info};

use crate::{
    AppState,
    error::AuthError,
    models::{LoginForm, NewUser, RegisterForm, User},
    password,
    repositories::UserRepository,
    session, validation,
};

/// Registration form page
const REGISTRATION_FORM: &str = r#"<!doctype html>
<html>
  <body>
    <form action="/cadastro" method="post">
      <input type="text" name="name" placeholder="Name" required>
      <input type="email" name="email" placeholder="Email" required>
      <input type="password" name="password" placeholder="Password" required>
      <button type="submit">Register</button>
    </form>
    <a href="/login">Log in instead</a>
  </body>
</html>"#;

/// Login form page
const LOGIN_FORM: &str = r#"<!doctype html>
<html>
  <body>
    <form action="/login" method="post">
      <input type="email" name="email" placeholder="Email" required>
      <input type="password" name="password" placeholder="Password" required>
      <button type="submit">Log in</button>
    </form>
    <a href="/cadastro">Create an account</a>
  </body>
</html>"#;

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/cadastro", get(registration_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/dashboard", get(dashboard))
        .route("/logout", get(logout))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Registration form page
pub async fn registration_form() -> Html<&'static str> {
    Html(REGISTRATION_FORM)
}

/// Login form page
pub async fn login_form() -> Html<&'static str> {
    Html(LOGIN_FORM)
}

/// Handle a submitted registration form
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AuthError> {
    match register_user(
        &state.user_repository,
        form.name.trim(),
        form.email.trim(),
        form.password.trim(),
    )
    .await
    {
        Ok(user) => {
            info!("Registered user {} with id {}", user.email, user.id);
            Ok(Redirect::to("/login?notice=registered").into_response())
        }
        Err(AuthError::Validation(msg)) => {
            info!("Rejected registration: {}", msg);
            Ok(Redirect::to("/cadastro?notice=missing-fields").into_response())
        }
        Err(AuthError::DuplicateEmail) => {
            info!("Rejected registration: email already taken");
            Ok(Redirect::to("/cadastro?notice=email-taken").into_response())
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            Err(e)
        }
    }
}

/// Handle a submitted login form
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AuthError> {
    let email = form.email.trim();
    let candidate = form.password.trim();

    if email.is_empty() || candidate.is_empty() {
        return Ok(Redirect::to("/login?notice=missing-fields").into_response());
    }

    match authenticate(&state.user_repository, email, candidate).await {
        Ok(user) => {
            info!("User {} logged in", user.id);
            let jar = session::establish(jar, &user)?;
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        // One notice for both unknown email and wrong password
        Err(AuthError::InvalidCredentials) => {
            info!("Failed login attempt");
            Ok(Redirect::to("/login?notice=invalid-credentials").into_response())
        }
        Err(e) => {
            error!("Login failed: {}", e);
            Err(e)
        }
    }
}

/// Session-gated dashboard
///
/// Renders from the session payload alone; the user row is not
/// re-fetched on every request.
pub async fn dashboard(jar: SignedCookieJar) -> Response {
    match session::current(&jar) {
        Some(s) => Json(serde_json::json!({
            "user_id": s.user_id,
            "user_name": s.user_name,
        }))
        .into_response(),
        None => Redirect::to("/login?notice=login-required").into_response(),
    }
}

/// Clear the session and return to the login page
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    (
        session::clear(jar),
        Redirect::to("/login?notice=logged-out"),
    )
}

/// Validate, hash, and store a new user
///
/// The email is checked defensively before the insert; the store's
/// UNIQUE constraint still backstops the race where two registrations
/// pass the check at once.
async fn register_user(
    repo: &UserRepository,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    validation::require("name", name).map_err(AuthError::Validation)?;
    validation::require("email", email).map_err(AuthError::Validation)?;
    validation::require("password", password).map_err(AuthError::Validation)?;

    if repo.find_by_email(email).await?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let password_hash = password::hash(password)?;

    let user = repo
        .create(&NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            common::error::StorageError::ConstraintViolation(_) => AuthError::DuplicateEmail,
            other => AuthError::Storage(other),
        })?;

    Ok(user)
}

/// Look up the user and check the candidate password
///
/// Unknown email and wrong password collapse into the same error so the
/// response cannot be used to probe which emails are registered.
async fn authenticate(
    repo: &UserRepository,
    email: &str,
    candidate: &str,
) -> Result<User, AuthError> {
    let Some(user) = repo.find_by_email(email).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    if password::verify(&user.password_hash, candidate)? {
        Ok(user)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::DatabaseConfig;

    fn temp_repository(dir: &tempfile::TempDir) -> UserRepository {
        let path = dir.path().join("usuarios.db");
        let config = DatabaseConfig {
            database_path: path.to_string_lossy().into_owned(),
        };
        UserRepository::new(config.connect_options())
    }

    async fn ready_repository(dir: &tempfile::TempDir) -> UserRepository {
        let repo = temp_repository(dir);
        repo.ensure_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ready_repository(&dir).await;

        let created = register_user(&repo, "Maria", "maria@email.com", "minhasenha123")
            .await
            .unwrap();
        assert_ne!(created.password_hash, "minhasenha123");

        let user = authenticate(&repo, "maria@email.com", "minhasenha123")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.name, "Maria");
    }

    #[tokio::test]
    async fn registration_requires_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ready_repository(&dir).await;

        for (name, email, password) in [
            ("", "maria@email.com", "senha"),
            ("Maria", "", "senha"),
            ("Maria", "maria@email.com", ""),
        ] {
            let err = register_user(&repo, name, email, password).await.unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
        }

        // Nothing was stored
        assert!(repo.find_by_email("maria@email.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_registration_with_same_email_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ready_repository(&dir).await;

        register_user(&repo, "Maria", "maria@email.com", "senha-um")
            .await
            .unwrap();
        let err = register_user(&repo, "Imposter", "maria@email.com", "senha-dois")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));

        // The first registration wins
        let user = authenticate(&repo, "maria@email.com", "senha-um").await.unwrap();
        assert_eq!(user.name, "Maria");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ready_repository(&dir).await;

        register_user(&repo, "Maria", "maria@email.com", "minhasenha123")
            .await
            .unwrap();

        let wrong_password = authenticate(&repo, "maria@email.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = authenticate(&repo, "nobody@email.com", "minhasenha123")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
