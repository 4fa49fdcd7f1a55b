pub mod identity_context;

pub use identity_context::IdentityContext;
