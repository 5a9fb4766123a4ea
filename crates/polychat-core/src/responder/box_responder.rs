//! BoxResponder -- object-safe dynamic dispatch wrapper for Responder.
//!
//! 1. Define an object-safe `ResponderDyn` trait with boxed futures
//! 2. Blanket-impl `ResponderDyn` for all `T: Responder`
//! 3. `BoxResponder` wraps `Box<dyn ResponderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use polychat_types::error::ResponderError;

use super::Responder;

/// Object-safe version of [`Responder`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn ResponderDyn`).
/// A blanket implementation is provided for all types implementing `Responder`.
pub trait ResponderDyn: Send + Sync {
    fn id(&self) -> &str;

    fn respond_boxed<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>>;
}

/// Blanket implementation: any `Responder` automatically implements `ResponderDyn`.
impl<T: Responder> ResponderDyn for T {
    fn id(&self) -> &str {
        Responder::id(self)
    }

    fn respond_boxed<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResponderError>> + Send + 'a>> {
        Box::pin(self.respond(message))
    }
}

/// Type-erased responder for runtime selection by model id.
///
/// Since `Responder` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxResponder` provides equivalent methods that delegate to
/// the inner `ResponderDyn` trait object.
pub struct BoxResponder {
    inner: Box<dyn ResponderDyn + Send + Sync>,
}

impl BoxResponder {
    /// Wrap a concrete `Responder` in a type-erased box.
    pub fn new<T: Responder + 'static>(responder: T) -> Self {
        Self {
            inner: Box::new(responder),
        }
    }

    /// The catalog identifier this responder answers for.
    pub fn id(&self) -> &str {
        self.inner.id()
    }

    /// Produce response text for one user message.
    pub async fn respond(&self, message: &str) -> Result<String, ResponderError> {
        self.inner.respond_boxed(message).await
    }
}
