//! Staff self-registration page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::{Validate, ValidationErrors};

use crate::api::dto::auth::RegisterRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Renders `templates/register.html`.
///
/// Entered names and email are echoed back when the form is re-rendered
/// after an error; passwords never are.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    first_name: String,
    last_name: String,
    email: String,
    allowed_domain: String,
    error: Option<String>,
    registered: Option<String>,
}

impl RegisterTemplate {
    fn blank(allowed_domain: &str) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            allowed_domain: allowed_domain.to_string(),
            error: None,
            registered: None,
        }
    }
}

/// `GET /register`
pub async fn register_page_handler(State(state): State<AppState>) -> impl IntoResponse {
    RegisterTemplate::blank(state.auth_service.allowed_email_domain())
}

/// `POST /register`
///
/// Creates the account and shows a confirmation, or re-renders the form
/// with the first error and `400 Bad Request` (`409` for a taken email).
pub async fn register_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<RegisterRequest>,
) -> Response {
    let mut page = RegisterTemplate::blank(state.auth_service.allowed_email_domain());
    page.first_name = form.first_name.clone();
    page.last_name = form.last_name.clone();
    page.email = form.email.clone();

    if let Err(errors) = form.validate() {
        page.error = Some(validation_message(&errors));
        return (StatusCode::BAD_REQUEST, page).into_response();
    }

    match state.auth_service.register(form.into()).await {
        Ok(user) => {
            page.registered = Some(user.email);
            (StatusCode::CREATED, page).into_response()
        }
        Err(e) => {
            let status = match e {
                AppError::Conflict { .. } => StatusCode::CONFLICT,
                AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            };
            page.error = Some(e.to_string());
            (status, page).into_response()
        }
    }
}

/// Joins field messages in field order.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_uses_field_messages() {
        let form = RegisterRequest {
            first_name: "Aysel".to_string(),
            last_name: String::new(),
            email: "not-an-email".to_string(),
            password1: "x".to_string(),
            password2: "x".to_string(),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(
            validation_message(&errors),
            "Enter a valid email address. This field is required"
        );
    }

    #[test]
    fn test_template_renders_error_and_keeps_input() {
        let mut page = RegisterTemplate::blank("ada.edu.az");
        page.email = "a@gmail.com".to_string();
        page.error = Some("Only ada.edu.az addresses can register".to_string());

        let html = page.render().unwrap();
        assert!(html.contains("Only ada.edu.az addresses can register"));
        assert!(html.contains("value=\"a@gmail.com\""));
        assert!(!html.contains("Account created"));
    }
}
