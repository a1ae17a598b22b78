//! UI surface the carousel renders on.
//!
//! A carousel session mounts one modal for its lifetime. Mounting returns a
//! [`MountedModal`] guard that unmounts on drop, so every exit path of the
//! session releases the UI nodes it added.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

// ============================================================================
// Surface Types
// ============================================================================

/// Identifier of a mounted modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(pub u64);

/// What a session asks the surface to mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSpec {
    /// Provider that owns the modal.
    pub provider: String,
    /// Number of creatives that will rotate through it.
    pub creative_count: usize,
    /// Total playback length in seconds.
    pub total_seconds: u64,
}

/// One creative as rendered, already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreativeFrame {
    /// Position in the creative list.
    pub index: usize,
    /// Creative name.
    pub name: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Call-to-action label.
    pub button_text: String,
    /// Call-to-action link.
    pub target_url: String,
    /// Image URL.
    pub image_url: String,
    /// Landscape-shaped image.
    pub is_horizontal: bool,
}

/// Capability to mount and update the ad modal.
pub trait AdSurface: Send + Sync {
    /// Mounts a new modal and returns its handle.
    fn mount(&self, spec: &ModalSpec) -> SurfaceHandle;

    /// Shows `frame` inside the modal.
    fn render(&self, handle: SurfaceHandle, frame: &CreativeFrame);

    /// Updates the countdown of seconds until the reward.
    fn countdown(&self, handle: SurfaceHandle, remaining_secs: u64);

    /// Removes the modal and everything it mounted.
    fn unmount(&self, handle: SurfaceHandle);
}

// ============================================================================
// Mounted Modal Guard
// ============================================================================

/// A mounted modal. Unmounts on drop.
pub struct MountedModal {
    surface: Arc<dyn AdSurface>,
    handle: SurfaceHandle,
}

impl MountedModal {
    /// Mounts a modal on `surface`.
    pub fn mount(surface: Arc<dyn AdSurface>, spec: &ModalSpec) -> Self {
        let handle = surface.mount(spec);
        Self { surface, handle }
    }

    /// Handle of this modal.
    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    /// Shows a creative.
    pub fn render(&self, frame: &CreativeFrame) {
        self.surface.render(self.handle, frame);
    }

    /// Updates the countdown.
    pub fn countdown(&self, remaining_secs: u64) {
        self.surface.countdown(self.handle, remaining_secs);
    }
}

impl Drop for MountedModal {
    fn drop(&mut self) {
        self.surface.unmount(self.handle);
    }
}

// ============================================================================
// Headless Surface
// ============================================================================

/// Event recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A modal was mounted.
    Mounted(SurfaceHandle),
    /// A creative was shown.
    Rendered {
        /// Modal handle.
        handle: SurfaceHandle,
        /// Creative index.
        index: usize,
        /// Creative name.
        name: String,
    },
    /// The countdown changed.
    Countdown {
        /// Modal handle.
        handle: SurfaceHandle,
        /// Seconds until the reward.
        remaining_secs: u64,
    },
    /// A modal was removed.
    Unmounted(SurfaceHandle),
}

#[derive(Default)]
struct HeadlessState {
    events: Vec<SurfaceEvent>,
    mounted: Vec<SurfaceHandle>,
}

/// A surface with no UI that records everything it is asked to do.
///
/// Used by the CLI and by tests to verify mount/unmount pairing.
#[derive(Default)]
pub struct HeadlessSurface {
    next_handle: AtomicU64,
    state: Mutex<HeadlessState>,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut HeadlessState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// All events recorded so far.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.with_state(|s| s.events.clone())
    }

    /// Events that belong to one modal.
    pub fn events_for(&self, handle: SurfaceHandle) -> Vec<SurfaceEvent> {
        self.with_state(|s| {
            s.events
                .iter()
                .filter(|e| match e {
                    SurfaceEvent::Mounted(h) | SurfaceEvent::Unmounted(h) => *h == handle,
                    SurfaceEvent::Rendered { handle: h, .. }
                    | SurfaceEvent::Countdown { handle: h, .. } => *h == handle,
                })
                .cloned()
                .collect()
        })
    }

    /// Creative indices rendered in order, across all modals.
    pub fn rendered_indices(&self) -> Vec<usize> {
        self.with_state(|s| {
            s.events
                .iter()
                .filter_map(|e| match e {
                    SurfaceEvent::Rendered { index, .. } => Some(*index),
                    _ => None,
                })
                .collect()
        })
    }

    /// Number of modals currently mounted.
    pub fn mounted_count(&self) -> usize {
        self.with_state(|s| s.mounted.len())
    }

    /// Number of events recorded.
    pub fn event_count(&self) -> usize {
        self.with_state(|s| s.events.len())
    }
}

impl AdSurface for HeadlessSurface {
    fn mount(&self, spec: &ModalSpec) -> SurfaceHandle {
        let handle = SurfaceHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        debug!(handle = handle.0, provider = %spec.provider, creatives = spec.creative_count, "Modal mounted");
        self.with_state(|s| {
            s.mounted.push(handle);
            s.events.push(SurfaceEvent::Mounted(handle));
        });
        handle
    }

    fn render(&self, handle: SurfaceHandle, frame: &CreativeFrame) {
        debug!(handle = handle.0, index = frame.index, name = %frame.name, "Creative rendered");
        self.with_state(|s| {
            s.events.push(SurfaceEvent::Rendered {
                handle,
                index: frame.index,
                name: frame.name.clone(),
            });
        });
    }

    fn countdown(&self, handle: SurfaceHandle, remaining_secs: u64) {
        self.with_state(|s| {
            s.events.push(SurfaceEvent::Countdown {
                handle,
                remaining_secs,
            });
        });
    }

    fn unmount(&self, handle: SurfaceHandle) {
        debug!(handle = handle.0, "Modal unmounted");
        self.with_state(|s| {
            s.mounted.retain(|h| *h != handle);
            s.events.push(SurfaceEvent::Unmounted(handle));
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
