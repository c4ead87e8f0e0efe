use std::fmt;
use std::sync::Arc;

use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, Handler};

/// A cross-cutting layer interposed between route match and view execution.
///
/// A wrapper receives the rest of the chain as `inner` and decides how to
/// delegate to it. It may mutate the request before delegating; the mutation
/// is visible to every inner wrapper and to the view.
pub trait Wrapper: Send + Sync {
    fn call(&self, inner: &Handler, req: &mut Request, args: &CallArgs) -> Response;
}

impl<F> Wrapper for F
where
    F: Fn(&Handler, &mut Request, &CallArgs) -> Response + Send + Sync,
{
    fn call(&self, inner: &Handler, req: &mut Request, args: &CallArgs) -> Response {
        self(inner, req, args)
    }
}

/// Box a closure as a shareable wrapper
pub fn wrap_fn<F>(f: F) -> Arc<dyn Wrapper>
where
    F: Fn(&Handler, &mut Request, &CallArgs) -> Response + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Fold `wrappers` around `handler`, right to left.
///
/// The last wrapper becomes the innermost layer and the first wrapper the
/// outermost, so declaration order equals execution order from the outside in.
#[must_use]
pub fn compose(handler: Handler, wrappers: &[Arc<dyn Wrapper>]) -> Handler {
    wrappers.iter().rev().fold(handler, |inner, wrapper| {
        let wrapper = Arc::clone(wrapper);
        let composed: Handler =
            Arc::new(move |req: &mut Request, args: &CallArgs| wrapper.call(&inner, req, args));
        composed
    })
}

/// Ordered, cheaply clonable list of wrappers shared by every route of one
/// registration call.
#[derive(Clone)]
pub struct WrapperChain {
    wrappers: Arc<[Arc<dyn Wrapper>]>,
}

impl Default for WrapperChain {
    fn default() -> Self {
        Self {
            wrappers: Arc::from(Vec::new()),
        }
    }
}

impl WrapperChain {
    /// An empty chain; composing with it returns the handler unchanged
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wrapper; it runs inside every wrapper already in the chain
    #[must_use]
    pub fn with(self, wrapper: Arc<dyn Wrapper>) -> Self {
        let mut wrappers: Vec<Arc<dyn Wrapper>> =
            self.wrappers.iter().map(Arc::clone).collect();
        wrappers.push(wrapper);
        Self {
            wrappers: wrappers.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }

    #[must_use]
    pub fn compose(&self, handler: Handler) -> Handler {
        compose(handler, &self.wrappers)
    }
}

impl From<Vec<Arc<dyn Wrapper>>> for WrapperChain {
    fn from(wrappers: Vec<Arc<dyn Wrapper>>) -> Self {
        Self {
            wrappers: wrappers.into(),
        }
    }
}

impl fmt::Debug for WrapperChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperChain")
            .field("len", &self.wrappers.len())
            .finish()
    }
}
