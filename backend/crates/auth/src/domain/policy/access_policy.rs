//! Access Policy
//!
//! Static table of protected operations and the roles allowed to run them.
//!
//! | Operation | Allowed roles |
//! |---|---|
//! | view own order/account | any authenticated |
//! | create order | any authenticated |
//! | view all orders | clerk, admin |
//! | view all accounts | clerk, admin |
//! | delete order | clerk |
//! | delete account | admin |

use derive_more::Display;

use crate::domain::value_object::account_role::AccountRole;

/// Protected shop operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Operation {
    #[display("view_own_account")]
    ViewOwnAccount,
    #[display("view_own_orders")]
    ViewOwnOrders,
    #[display("create_order")]
    CreateOrder,
    #[display("view_all_orders")]
    ViewAllOrders,
    #[display("view_all_accounts")]
    ViewAllAccounts,
    #[display("delete_order")]
    DeleteOrder,
    #[display("delete_account")]
    DeleteAccount,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::ViewOwnAccount,
        Operation::ViewOwnOrders,
        Operation::CreateOrder,
        Operation::ViewAllOrders,
        Operation::ViewAllAccounts,
        Operation::DeleteOrder,
        Operation::DeleteAccount,
    ];

    /// Roles permitted to run this operation
    pub const fn allowed_roles(&self) -> AllowedRoles {
        use Operation::*;
        match self {
            ViewOwnAccount | ViewOwnOrders | CreateOrder => AllowedRoles::AnyAuthenticated,
            ViewAllOrders | ViewAllAccounts => {
                AllowedRoles::Only(&[AccountRole::Clerk, AccountRole::Admin])
            }
            DeleteOrder => AllowedRoles::Only(&[AccountRole::Clerk]),
            DeleteAccount => AllowedRoles::Only(&[AccountRole::Admin]),
        }
    }
}

/// Required-role set for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedRoles {
    AnyAuthenticated,
    Only(&'static [AccountRole]),
}

impl AllowedRoles {
    pub fn permits(&self, role: AccountRole) -> bool {
        match self {
            AllowedRoles::AnyAuthenticated => true,
            AllowedRoles::Only(roles) => roles.contains(&role),
        }
    }
}

/// Whether `role` may run `operation`
pub fn authorize(operation: Operation, role: AccountRole) -> bool {
    operation.allowed_roles().permits(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AccountRole::*;

    #[test]
    fn test_operation_table() {
        let expected: [(Operation, &[AccountRole]); 7] = [
            (Operation::ViewOwnAccount, &[User, Clerk, Admin]),
            (Operation::ViewOwnOrders, &[User, Clerk, Admin]),
            (Operation::CreateOrder, &[User, Clerk, Admin]),
            (Operation::ViewAllOrders, &[Clerk, Admin]),
            (Operation::ViewAllAccounts, &[Clerk, Admin]),
            (Operation::DeleteOrder, &[Clerk]),
            (Operation::DeleteAccount, &[Admin]),
        ];

        for (operation, allowed) in expected {
            for role in AccountRole::ALL {
                assert_eq!(
                    authorize(operation, role),
                    allowed.contains(&role),
                    "{operation} for {role}"
                );
            }
        }
    }

    #[test]
    fn test_admin_cannot_delete_orders() {
        assert!(!authorize(Operation::DeleteOrder, Admin));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::DeleteAccount.to_string(), "delete_account");
        assert_eq!(Operation::ViewAllAccounts.to_string(), "view_all_accounts");
    }
}
