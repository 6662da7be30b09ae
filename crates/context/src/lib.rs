//! Request context types shared between the gate middleware and handlers.

mod tenant_identity;

pub use tenant_identity::TenantIdentity;
