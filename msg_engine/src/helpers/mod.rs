pub mod password;
pub mod retry;

pub use password::{hash_password, verify_password, PasswordError};
pub use retry::{retry_with_fixed_delay, RetryPolicy};
