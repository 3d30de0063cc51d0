/// Account pages: landing page, login, logout and sign-up
use crate::{error::Result, messages, middleware::Session, state::AppState, views};
use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use shelf_core::{NewUser, Role};
use shelf_storage::users;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_check: String,
}

/// GET /
pub async fn index(session: Session) -> Result<Html<String>> {
    let identity = session.identity().await?;
    Ok(Html(views::index(identity.as_ref(), None)))
}

/// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>> {
    let email = form.email.trim();
    let user = users::find_by_email(app_state.db.pool(), email).await?;

    let identity = user
        .filter(|user| {
            app_state
                .auth_service
                .credentials_match(&form.password, &user.password_hash)
        })
        .map(|user| user.identity());

    let Some(identity) = identity else {
        tracing::info!("Failed login attempt");
        session.clear().await?;
        return Ok(Html(views::index(None, Some(messages::INVALID_CREDENTIALS))));
    };

    session.log_in(&identity).await?;
    tracing::info!(user_id = identity.user_id, "User logged in");

    let welcome = messages::welcome(&identity.name);
    Ok(Html(views::index(Some(&identity), Some(welcome.as_str()))))
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Html<String>> {
    session.destroy().await?;
    Ok(Html(views::index(None, Some(messages::LOGGED_OUT))))
}

/// GET /create_account
pub async fn create_account_form(session: Session) -> Result<Html<String>> {
    let identity = session.identity().await?;
    Ok(Html(views::create_account(
        identity.as_ref(),
        messages::CREATE_ACCOUNT_PROMPT,
    )))
}

/// POST /create_account
pub async fn create_account(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<CreateAccountForm>,
) -> Result<Html<String>> {
    let identity = session.identity().await?;
    let message = register(&app_state, &form).await?;
    Ok(Html(views::create_account(identity.as_ref(), message)))
}

/// Validate a sign-up form and create the account; returns the message to show
async fn register(app_state: &AppState, form: &CreateAccountForm) -> Result<&'static str> {
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Ok(messages::EMPTY_ACCOUNT_FIELDS);
    }

    if form.password != form.password_check {
        return Ok(messages::PASSWORD_MISMATCH);
    }

    let pool = app_state.db.pool();
    if users::email_exists(pool, email).await? {
        return Ok(messages::EMAIL_ALREADY_PRESENT);
    }

    let password_hash = app_state.auth_service.hash_password(&form.password)?;
    let new_user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role: Role::User,
    };

    match users::create(pool, new_user).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "Account created");
            Ok(messages::ACCOUNT_CREATED)
        }
        // Lost the race against a concurrent sign-up with the same email
        Err(e) if e.is_duplicate() => Ok(messages::EMAIL_ALREADY_PRESENT),
        Err(e) => {
            tracing::error!("Failed to create account: {}", e);
            Ok(messages::TRY_AGAIN_LATER)
        }
    }
}
