//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap_admin;
pub mod change_password;
pub mod check_session;
pub mod config;
pub mod federated;
pub mod manage_users;
pub mod register_customer;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use bootstrap_admin::{BootstrapAdminInput, BootstrapAdminUseCase};
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use federated::FederatedLoginUseCase;
pub use manage_users::{CreateUserInput, ManageUsersUseCase, UpdateUserInput};
pub use register_customer::{RegisterCustomerInput, RegisterCustomerOutput, RegisterCustomerUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;

use kernel::validation::Validator;
use platform::password::ClearTextPassword;

/// Run the password policy for `field`, recording a failure on `v`.
pub(crate) fn checked_password(
    v: &mut Validator,
    field: &'static str,
    raw: String,
    min_len: usize,
) -> Option<ClearTextPassword> {
    match ClearTextPassword::new(raw, min_len) {
        Ok(password) => Some(password),
        Err(e) => {
            v.check(field, false, e.to_string());
            None
        }
    }
}
