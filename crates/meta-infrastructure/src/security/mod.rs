//! Access control adapters

pub mod permission_resolver;

pub use permission_resolver::RoleBasedPermissionResolver;
