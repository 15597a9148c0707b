/// A resource that can be released.
///
/// This is the contract between the slots in this crate and the resources they
/// hold: one no-argument release action, invoked through a shared reference so
/// that any holder of a handle may trigger it.
///
/// Releasing must tolerate repeat calls. The slots themselves never release a
/// resource more than once, but a resource handle may be shared between
/// several owners and the contract does not require them to coordinate.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// use disposable_slot::Disposable;
///
/// struct Connection {
///     closed: AtomicBool,
/// }
///
/// impl Disposable for Connection {
///     fn dispose(&self) {
///         self.closed.store(true, Ordering::Release);
///     }
/// }
///
/// let connection = Connection {
///     closed: AtomicBool::new(false),
/// };
///
/// connection.dispose();
/// assert!(connection.closed.load(Ordering::Acquire));
/// ```
pub trait Disposable {
    /// Releases the resource.
    ///
    /// Calls after the first are expected to be no-ops. A failure raised from
    /// here propagates to whoever triggered the release; neither slot type in
    /// this crate suppresses or retries it.
    fn dispose(&self);
}
