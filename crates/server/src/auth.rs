mod error;
mod layer;
mod registry;

pub(crate) use layer::AuthLayer;
pub(crate) use registry::TenantRegistry;

type AuthResult<T> = Result<T, error::AuthError>;
