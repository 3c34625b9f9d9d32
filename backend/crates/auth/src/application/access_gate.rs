//! Access Gate
//!
//! Runs protected operations only for sessions whose role the access table
//! permits. A denied call never runs the operation body; the denial is logged
//! with the operation and the acting role and returned as
//! [`AuthError::AccessDenied`].

use std::future::Future;

use crate::domain::entity::session::Session;
use crate::domain::policy::access_policy::{AllowedRoles, Operation};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    pub fn new() -> Self {
        Self
    }

    /// Check the session's role against the operation's table entry
    pub fn check(&self, session: &Session, operation: Operation) -> AuthResult<()> {
        self.check_roles(session, operation, operation.allowed_roles())
    }

    /// Check the session's role against an explicit role set
    pub fn check_roles(
        &self,
        session: &Session,
        operation: Operation,
        allowed: AllowedRoles,
    ) -> AuthResult<()> {
        let role = session.role();
        if allowed.permits(role) {
            tracing::debug!(operation = %operation, role = %role, "Access granted");
            return Ok(());
        }

        tracing::warn!(
            operation = %operation,
            role = %role,
            email = %session.email(),
            "Unauthorised access"
        );
        Err(AuthError::AccessDenied { operation, role })
    }

    /// Run an async operation body if the session may perform `operation`
    pub async fn run<T, F, Fut>(
        &self,
        session: &Session,
        operation: Operation,
        body: F,
    ) -> AuthResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AuthResult<T>>,
    {
        self.check(session, operation)?;
        body().await
    }
}

/// Wrap a synchronous operation so every call goes through the gate
pub fn guarded<A, T, F>(operation: Operation, body: F) -> impl Fn(&Session, A) -> AuthResult<T>
where
    F: Fn(&Session, A) -> T,
{
    move |session: &Session, args: A| {
        AccessGate.check(session, operation)?;
        Ok(body(session, args))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::Utc;

    use super::*;
    use crate::application::token::TokenIssuer;
    use crate::domain::entity::account::{Account, Profile};
    use crate::domain::value_object::{
        account_number::AccountNumber, account_password::PasswordMaterial,
        account_role::AccountRole, email::Email, security_mode::SecurityMode,
    };

    fn session(role: AccountRole) -> Session {
        let email = Email::from_stored("staff@example.com");
        let account = Account::new(
            email.clone(),
            AccountNumber::FIRST,
            PasswordMaterial::Plain("x".into()),
            Profile::default(),
        )
        .with_role(role);
        let now = Utc::now();
        let token = TokenIssuer::new(b"gate-test").issue(&email, role, now).unwrap();
        Session::new(account, role, SecurityMode::Secure, token, now)
    }

    #[test]
    fn test_denied_body_never_runs() {
        let ran = Cell::new(0);
        let delete = guarded(Operation::DeleteAccount, |_: &Session, n: u64| {
            ran.set(ran.get() + 1);
            n
        });

        let denied = delete(&session(AccountRole::User), 7);
        assert!(matches!(
            denied,
            Err(AuthError::AccessDenied {
                operation: Operation::DeleteAccount,
                role: AccountRole::User,
            })
        ));
        assert_eq!(ran.get(), 0);

        assert_eq!(delete(&session(AccountRole::Admin), 7).unwrap(), 7);
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_every_table_entry_enforced() {
        let gate = AccessGate::new();
        for operation in Operation::ALL {
            for role in AccountRole::ALL {
                let allowed = operation.allowed_roles().permits(role);
                let ran = Cell::new(false);
                let wrapped = guarded(operation, |_: &Session, ()| ran.set(true));

                assert_eq!(gate.check(&session(role), operation).is_ok(), allowed);
                assert_eq!(wrapped(&session(role), ()).is_ok(), allowed);
                assert_eq!(ran.get(), allowed, "{operation} for {role}");
            }
        }
    }

    #[test]
    fn test_explicit_role_set() {
        let gate = AccessGate::new();
        let clerk = session(AccountRole::Clerk);
        let admins_only = AllowedRoles::Only(&[AccountRole::Admin]);
        assert!(gate
            .check_roles(&clerk, Operation::ViewAllOrders, admins_only)
            .is_err());
        assert!(gate
            .check_roles(&clerk, Operation::ViewAllOrders, AllowedRoles::AnyAuthenticated)
            .is_ok());
    }

    #[tokio::test]
    async fn test_async_run() {
        let gate = AccessGate::new();

        let result = gate
            .run(&session(AccountRole::Clerk), Operation::ViewAllOrders, || async {
                Ok(vec!["order-1"])
            })
            .await;
        assert_eq!(result.unwrap(), vec!["order-1"]);

        let ran = Cell::new(false);
        let result: AuthResult<()> = gate
            .run(&session(AccountRole::Admin), Operation::DeleteOrder, || async {
                ran.set(true);
                Ok(())
            })
            .await;
        assert!(result.unwrap_err().is_denial());
        assert!(!ran.get());
    }
}
