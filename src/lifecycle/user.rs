use std::sync::Arc;

use uuid::Uuid;

use crate::auth::password;
use crate::clock::Clock;
use crate::db::UserStore;
use crate::error::AppError;
use crate::forms::{RegisterForm, ValidationErrors};
use crate::models::user::{ROLE_ADMIN, ROLE_USER};
use crate::models::User;

#[derive(Debug)]
pub enum RegistrationError {
    /// Field-level problems; the form is re-rendered with them.
    Invalid(ValidationErrors),
    /// Hashing or persistence failure; fatal for the request.
    Fatal(AppError),
}

impl From<AppError> for RegistrationError {
    fn from(err: AppError) -> Self {
        RegistrationError::Fatal(err)
    }
}

impl From<sqlx::Error> for RegistrationError {
    fn from(err: sqlx::Error) -> Self {
        RegistrationError::Fatal(AppError::Database(err))
    }
}

/// Self-registration. The session guard (authenticated callers may not
/// register) lives in the route handler; everything after validation is
/// here.
pub struct Registration {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl Registration {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<User, RegistrationError> {
        form.validate().map_err(RegistrationError::Invalid)?;

        let email = form.email.trim().to_lowercase();
        if self.store.find_by_email(&email).await?.is_some() {
            let mut errors = ValidationErrors::default();
            errors.add("email", "An account with this email already exists");
            return Err(RegistrationError::Invalid(errors));
        }

        // The very first account bootstraps the back-office and gets the
        // admin role on top of the base one.
        let mut roles = vec![ROLE_USER.to_string()];
        if self.store.count().await? == 0 {
            roles.push(ROLE_ADMIN.to_string());
        }

        let password_hash = password::hash(&form.password)
            .map_err(|e| RegistrationError::Fatal(AppError::Internal(e)))?;

        let now = self.clock.now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            roles,
            created_at: now,
            updated_at: now,
        };

        self.store.save(&user).await?;
        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }
}
