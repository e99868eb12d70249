//! # Role guard
//!
//! Decision tables only, no history is kept between requests.
//!
//! ## Page guard
//! - No session: go to `/login`
//! - Role not allowed: go to that role's home dashboard
//!
//! ## Dashboard proxy
//! - Applies to `/admin-dashboard…` and `/seller-dashboard…`
//! - A customer wandering into either is sent to the storefront root
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Session;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";
pub const ADMIN_HOME: &str = "/admin-dashboard";
pub const SELLER_HOME: &str = "/seller-dashboard";
pub const CUSTOMER_HOME: &str = "/dashboard";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Seller,
    Admin,
}

impl Role {
    pub fn home(self) -> &'static str {
        match self {
            Role::Customer => CUSTOMER_HOME,
            Role::Seller => SELLER_HOME,
            Role::Admin => ADMIN_HOME,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "CUSTOMER"),
            Role::Seller => write!(f, "SELLER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Access<'a> {
    Granted(&'a Session),
    Redirect(&'static str),
}

impl Access<'_> {
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Access::Granted(_) => None,
            Access::Redirect(path) => Some(path),
        }
    }
}

pub fn authorize<'a>(session: Option<&'a Session>, allowed: &[Role]) -> Access<'a> {
    let Some(session) = session else {
        return Access::Redirect(LOGIN_PATH);
    };

    let role = session.user.role;
    if allowed.contains(&role) {
        Access::Granted(session)
    } else {
        Access::Redirect(role.home())
    }
}

/// Dashboard proxy: every guarded path requires a session, and the two
/// staff dashboards only admit their own role.
pub fn route_access<'a>(path: &str, session: Option<&'a Session>) -> Access<'a> {
    let Some(session) = session else {
        return Access::Redirect(LOGIN_PATH);
    };

    let role = session.user.role;
    let required = if path.starts_with(ADMIN_HOME) {
        Some(Role::Admin)
    } else if path.starts_with(SELLER_HOME) {
        Some(Role::Seller)
    } else {
        None
    };

    match (required, role) {
        (None, _) => Access::Granted(session),
        (Some(required), role) if required == role => Access::Granted(session),
        (Some(_), Role::Customer) => Access::Redirect(ROOT_PATH),
        (Some(_), staff) => Access::Redirect(staff.home()),
    }
}
