//! Viewport size and orientation-change listeners.
//!
//! The viewport is shared by every carousel session. Each session takes an
//! [`OrientationListener`] for its lifetime; dropping the listener
//! unregisters it, so the live listener count returns to zero once every
//! session has settled.

use adrelay_core::{Orientation, ViewportSize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

struct ViewportInner {
    size: watch::Sender<ViewportSize>,
    listeners: AtomicUsize,
}

// ============================================================================
// Viewport
// ============================================================================

/// Handle to the host viewport. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<ViewportInner>,
}

impl Viewport {
    /// Creates a viewport with the given initial size.
    pub fn new(size: ViewportSize) -> Self {
        let (tx, _rx) = watch::channel(size);
        Self {
            inner: Arc::new(ViewportInner {
                size: tx,
                listeners: AtomicUsize::new(0),
            }),
        }
    }

    /// A portrait phone viewport.
    pub fn portrait() -> Self {
        Self::new(ViewportSize::PORTRAIT)
    }

    /// A landscape phone viewport.
    pub fn landscape() -> Self {
        Self::new(ViewportSize::LANDSCAPE)
    }

    /// Current size.
    pub fn size(&self) -> ViewportSize {
        *self.inner.size.borrow()
    }

    /// Current orientation.
    pub fn orientation(&self) -> Orientation {
        self.size().orientation()
    }

    /// Returns true if the viewport is currently portrait.
    pub fn is_portrait(&self) -> bool {
        self.orientation().is_portrait()
    }

    /// Reports a new size from the host (a resize or rotation).
    pub fn resize(&self, size: ViewportSize) {
        let previous = self.inner.size.send_replace(size);
        if previous.orientation() != size.orientation() {
            debug!(from = %previous.orientation(), to = %size.orientation(), "Orientation changed");
        }
    }

    /// Registers an orientation listener.
    pub fn subscribe(&self) -> OrientationListener {
        let count = self.inner.listeners.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(listeners = count, "Orientation listener added");
        OrientationListener {
            rx: self.inner.size.subscribe(),
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.load(Ordering::SeqCst)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::portrait()
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// ============================================================================
// Orientation Listener
// ============================================================================

/// A registered orientation listener. Unregisters on drop.
pub struct OrientationListener {
    rx: watch::Receiver<ViewportSize>,
    inner: Arc<ViewportInner>,
}

impl OrientationListener {
    /// Resolves once the viewport is no longer portrait.
    ///
    /// Resolves immediately if it already isn't.
    pub async fn left_portrait(&mut self) -> Orientation {
        let changed = self
            .rx
            .wait_for(|s| !s.orientation().is_portrait())
            .await
            .map(|size| size.orientation());
        match changed {
            Ok(orientation) => orientation,
            // The listener keeps the sender alive, so the channel cannot close
            Err(_) => std::future::pending().await,
        }
    }
}

impl Drop for OrientationListener {
    fn drop(&mut self) {
        let remaining = self.inner.listeners.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(listeners = remaining, "Orientation listener removed");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_listener_registration() {
        let viewport = Viewport::portrait();
        assert_eq!(viewport.listener_count(), 0);

        let a = viewport.subscribe();
        let b = viewport.clone().subscribe();
        assert_eq!(viewport.listener_count(), 2);

        drop(a);
        assert_eq!(viewport.listener_count(), 1);
        drop(b);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_resize_changes_orientation() {
        let viewport = Viewport::portrait();
        assert!(viewport.is_portrait());
        viewport.resize(ViewportSize::LANDSCAPE);
        assert_eq!(viewport.orientation(), Orientation::Landscape);
    }

    #[tokio::test]
    async fn test_left_portrait_waits_for_rotation() {
        let viewport = Viewport::portrait();
        let mut listener = viewport.subscribe();

        // Portrait resize does not wake it
        viewport.resize(ViewportSize::new(400, 900));
        let pending = tokio::time::timeout(Duration::from_millis(20), listener.left_portrait()).await;
        assert!(pending.is_err());

        viewport.resize(ViewportSize::LANDSCAPE);
        assert_eq!(listener.left_portrait().await, Orientation::Landscape);
    }
}
