use tracing::warn;

use super::Wrapper;
use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, Handler};

/// Rejects requests whose `authorization` header does not match the token.
///
/// On success the wrapper marks the request with an `authenticated`
/// attribute before delegating.
pub struct AuthWrapper {
    token: String,
}

impl AuthWrapper {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

impl Wrapper for AuthWrapper {
    fn call(&self, inner: &Handler, req: &mut Request, args: &CallArgs) -> Response {
        match req.get_header("authorization") {
            Some(h) if h == self.token => {
                req.set_attribute("authenticated", serde_json::Value::Bool(true));
                inner(req, args)
            }
            _ => {
                warn!(path = %req.path, method = %req.method, "Rejected unauthenticated request");
                Response::error(401, "Unauthorized")
            }
        }
    }
}
