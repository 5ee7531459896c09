#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::shared::constants::ROLE_ADMIN;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use rust_decimal::Decimal;

#[cfg(test)]
pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        name: Some("Test Admin".to_string()),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

#[cfg(test)]
pub fn create_customer_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-customer".to_string(),
        name: None,
        roles: vec!["member".to_string()],
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_customer_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_customer_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

#[cfg(test)]
pub fn with_customer_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_customer_middleware))
}
