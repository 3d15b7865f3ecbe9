mod access;
mod route_guards;

pub use access::{AccessGuard, GroupAccess, GroupRole};
pub use route_guards::protect_route;
