//! # Account Commands
//!
//! Registration, sign-in and sign-out.
//!
//! There is no credential check: the password must be present, and the
//! account is built from the form and stored as the current user.
//!
//! ```text
//! register ──► Account::register(name, email, artist name, bio) ─┐
//!                                                               ├─► save "currentUser"
//! login ─────► Account::sign_in(email) ─────────────────────────┘   notify "Welcome, {name}!"
//!
//! logout ────► remove "currentUser" + "cartItems" ──► notify "Logged out successfully"
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use artvault_core::validation::{validate_email, validate_required};
use artvault_core::Account;

use crate::error::ApiError;
use crate::notify::Notifier;
use crate::state::{SessionState, StoreState};

/// The registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub artist_name: Option<String>,
    pub bio: Option<String>,
}

/// The sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Returns the trimmed name and email.
    fn validate(&self) -> Result<(String, String), ApiError> {
        let name = validate_required("name", &self.name)?;
        let email = validate_email(&self.email)?;
        validate_required("password", &self.password)?;
        Ok((name, email))
    }
}

impl LoginForm {
    /// Returns the trimmed email.
    fn validate(&self) -> Result<String, ApiError> {
        let email = validate_email(&self.email)?;
        validate_required("password", &self.password)?;
        Ok(email)
    }
}

fn welcome(name: &str) -> String {
    if name.is_empty() {
        "Welcome!".to_string()
    } else {
        format!("Welcome, {}!", name)
    }
}

/// Stores `account` as the current user and greets it.
async fn sign_in_as(
    store: &StoreState,
    session: &SessionState,
    notifier: &dyn Notifier,
    account: Account,
) -> Result<Account, ApiError> {
    store.marketplace().save_account(&account).await?;
    session.with_session_mut(|s| s.account = Some(account.clone()));

    info!(account_id = %account.id, "Signed in");
    notifier.success(&welcome(&account.name));
    Ok(account)
}

/// Creates a new account and signs it in.
pub async fn register(
    store: &StoreState,
    session: &SessionState,
    notifier: &dyn Notifier,
    form: RegisterForm,
) -> Result<Account, ApiError> {
    debug!(email = %form.email, "register command");

    let (name, email) = match form.validate() {
        Ok(fields) => fields,
        Err(err) => {
            notifier.error(&err.message);
            return Err(err);
        }
    };

    let account = Account::register(
        Uuid::new_v4().to_string(),
        &name,
        &email,
        form.artist_name.as_deref(),
        form.bio.as_deref(),
        Utc::now(),
    );
    sign_in_as(store, session, notifier, account).await
}

/// Signs in with an email address.
pub async fn login(
    store: &StoreState,
    session: &SessionState,
    notifier: &dyn Notifier,
    form: LoginForm,
) -> Result<Account, ApiError> {
    debug!(email = %form.email, "login command");

    let email = match form.validate() {
        Ok(email) => email,
        Err(err) => {
            notifier.error(&err.message);
            return Err(err);
        }
    };

    let account = Account::sign_in(Uuid::new_v4().to_string(), &email, Utc::now());
    sign_in_as(store, session, notifier, account).await
}

/// Signs out and empties the cart.
pub async fn logout(
    store: &StoreState,
    session: &SessionState,
    notifier: &dyn Notifier,
) -> Result<(), ApiError> {
    debug!("logout command");

    let marketplace = store.marketplace();
    marketplace.remove_account().await?;
    marketplace.remove_cart().await?;

    session.with_session_mut(|s| {
        s.account = None;
        s.cart.clear();
    });

    info!("Signed out");
    notifier.success("Logged out successfully");
    Ok(())
}

/// The signed-in account, if any.
pub fn current_account(session: &SessionState) -> Option<Account> {
    debug!("current_account command");
    session.with_session(|s| s.account.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Fixture;
    use crate::error::ErrorCode;
    use crate::notify::{Level, Notification};
    use artvault_core::CartLine;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "hunter2".to_string(),
            artist_name: None,
            bio: Some("Painter of compilers".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let fx = Fixture::new().await;

        let account = register(&fx.store, &fx.session, &fx.notifier, register_form())
            .await
            .unwrap();

        assert_eq!(account.artist_name, "Grace Hopper");
        assert_eq!(account.bio, "Painter of compilers");
        assert_eq!(current_account(&fx.session), Some(account.clone()));
        assert_eq!(
            fx.store.marketplace().load_account().await.unwrap(),
            Some(account)
        );
        assert_eq!(
            fx.notifier.last(),
            Some(Notification::new(Level::Success, "Welcome, Grace Hopper!"))
        );
    }

    #[tokio::test]
    async fn test_register_requires_password() {
        let fx = Fixture::new().await;
        let form = RegisterForm {
            password: String::new(),
            ..register_form()
        };

        let err = register(&fx.store, &fx.session, &fx.notifier, form)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(current_account(&fx.session).is_none());
        assert_eq!(fx.notifier.last().map(|n| n.level), Some(Level::Error));
    }

    #[tokio::test]
    async fn test_login_uses_email_local_part() {
        let fx = Fixture::new().await;
        let form = LoginForm {
            email: "ada@example.com".to_string(),
            password: "x".to_string(),
        };

        let account = login(&fx.store, &fx.session, &fx.notifier, form).await.unwrap();
        assert_eq!(account.name, "ada");
        assert_eq!(account.artist_name, "ada");
        assert_eq!(
            fx.notifier.last().map(|n| n.message),
            Some("Welcome, ada!".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_rejects_bad_email() {
        let fx = Fixture::new().await;
        let form = LoginForm {
            email: "ada".to_string(),
            password: "x".to_string(),
        };
        assert!(login(&fx.store, &fx.session, &fx.notifier, form).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_clears_account_and_cart() {
        let fx = Fixture::signed_in().await;
        let line = fx
            .session
            .with_session(|s| CartLine::from_listing(&s.listings[0]));
        fx.store.marketplace().save_cart(&[line.clone()]).await.unwrap();
        fx.session.with_session_mut(|s| s.cart = vec![line]);

        logout(&fx.store, &fx.session, &fx.notifier).await.unwrap();

        let marketplace = fx.store.marketplace();
        assert!(marketplace.load_account().await.unwrap().is_none());
        assert!(marketplace.load_cart().await.unwrap().is_empty());
        assert!(fx.session.snapshot().cart.is_empty());
        assert!(current_account(&fx.session).is_none());
        assert_eq!(
            fx.notifier.last().map(|n| n.message),
            Some("Logged out successfully".to_string())
        );
    }

    #[test]
    fn test_welcome_message() {
        assert_eq!(welcome(""), "Welcome!");
        assert_eq!(welcome("Lin"), "Welcome, Lin!");
    }
}
