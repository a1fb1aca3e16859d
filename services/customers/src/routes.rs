//! Customer registration routes

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::{error, info};

use crate::{
    AppState,
    error::CustomerError,
    models::{Customer, CustomerForm, NewCustomer},
    repositories::CustomerRepository,
};

/// Registration form page served at the root
const REGISTRATION_FORM: &str = r#"<!doctype html>
<html>
  <body>
    <form action="/salvar" method="post">
      <input type="text" name="name" placeholder="Name" required>
      <input type="email" name="email" placeholder="Email" required>
      <button type="submit">Save</button>
    </form>
  </body>
</html>"#;

/// Create the router for the customers service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(registration_form))
        .route("/salvar", post(save_customer))
        .route("/listar", get(list_customers))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "customers-service"
    }))
}

/// Registration form page
pub async fn registration_form() -> Html<&'static str> {
    Html(REGISTRATION_FORM)
}

/// Handle a submitted registration form
///
/// Empty fields bounce back to the form; a stored row redirects to the
/// listing. Server-side validation stays even though the form marks the
/// inputs `required`, since the browser check can be bypassed.
pub async fn save_customer(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, CustomerError> {
    match create_customer(&state.customer_repository, form.name.trim(), form.email.trim()).await {
        Ok(customer) => {
            info!("Customer {} saved with id {}", customer.name, customer.id);
            Ok(Redirect::to("/listar?notice=saved").into_response())
        }
        Err(CustomerError::Validation(msg)) => {
            info!("Rejected customer submission: {}", msg);
            Ok(Redirect::to("/?notice=missing-fields").into_response())
        }
        Err(e) => {
            error!("Failed to insert customer: {}", e);
            Err(e)
        }
    }
}

/// Validate presence of both fields, then store the customer
///
/// Nothing is written when either field is empty.
async fn create_customer(
    repo: &CustomerRepository,
    name: &str,
    email: &str,
) -> Result<Customer, CustomerError> {
    if name.is_empty() {
        return Err(CustomerError::Validation("name is required".to_string()));
    }
    if email.is_empty() {
        return Err(CustomerError::Validation("email is required".to_string()));
    }

    let customer = repo
        .insert(&NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await?;

    Ok(customer)
}

/// List all registered customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, CustomerError> {
    let customers = state.customer_repository.list_all().await.map_err(|e| {
        error!("Failed to list customers: {}", e);
        CustomerError::from(e)
    })?;

    Ok(Json(customers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::DatabaseConfig;

    fn temp_repository(dir: &tempfile::TempDir) -> CustomerRepository {
        let path = dir.path().join("clientes.db");
        let config = DatabaseConfig {
            database_path: path.to_string_lossy().into_owned(),
        };
        CustomerRepository::new(config.connect_options())
    }

    #[tokio::test]
    async fn valid_submission_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.ensure_schema().await.unwrap();

        let customer = create_customer(&repo, "Anderson", "anderson@email.com")
            .await
            .unwrap();
        assert_eq!(customer.name, "Anderson");

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "anderson@email.com");
    }

    #[tokio::test]
    async fn empty_fields_never_create_a_row() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.ensure_schema().await.unwrap();

        for (name, email) in [("", "anderson@email.com"), ("Anderson", ""), ("", "")] {
            let err = create_customer(&repo, name, email).await.unwrap_err();
            assert!(matches!(err, CustomerError::Validation(_)));
        }

        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
