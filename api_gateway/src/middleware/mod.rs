mod authentication;

pub use authentication::{credential_from_header, AuthenticatedSubject, AuthenticationFactory};
