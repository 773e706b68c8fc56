//! The navigate-to side effect.

/// Sends the user somewhere else.
///
/// Supplied by the host application; called by the navigator after a denial
/// and by the redirect-back flow after a successful login. It must not block:
/// hosts typically enqueue a new navigation.
pub trait Redirector: Send + Sync + 'static {
    /// Navigate to `url`.
    fn redirect(&self, url: &str);
}

impl<F> Redirector for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn redirect(&self, url: &str) {
        (self)(url)
    }
}
