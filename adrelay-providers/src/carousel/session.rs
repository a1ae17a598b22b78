//! Carousel playback engine.
//!
//! A session is one `show_rewarded_ad` call on the carousel:
//!
//! ```text
//! Idle -> Playing(index, elapsed) -> Completed | Interrupted
//! ```
//!
//! Every timer, the orientation listener, and the mounted modal live inside
//! [`CarouselSession::play`]. Whichever event ends the loop first decides the
//! outcome, and returning drops everything else, so a session resolves
//! exactly once and leaves nothing mounted or subscribed.

use adrelay_core::{AdResult, CreativeEntry, Language, Orientation, REWARD_EXTRA_GAME};
use adrelay_fetch::{AdSurface, CreativeFrame, ModalSpec, MountedModal, Viewport};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

// ============================================================================
// Outcome
// ============================================================================

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The aggregate timer fired in portrait orientation.
    Completed {
        /// Time from start to completion.
        elapsed: Duration,
        /// Number of creative renders, including repeats.
        frames_shown: usize,
        /// Language the creatives were shown in.
        language: Language,
    },
    /// The viewport left portrait before completion.
    Interrupted {
        /// Time from start to the interruption.
        elapsed: Duration,
        /// Creative on screen when it happened.
        index: usize,
        /// Orientation that ended the session.
        orientation: Orientation,
    },
    /// The session was requested outside portrait orientation.
    NotPortrait,
    /// There was nothing to play.
    NoCreatives,
}

impl SessionOutcome {
    /// Returns true if the reward was earned.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Converts the outcome into the result reported by `provider`.
    pub fn into_result(self, provider: &str) -> AdResult {
        match self {
            Self::Completed {
                elapsed,
                frames_shown,
                language,
            } => AdResult::rewarded(provider, REWARD_EXTRA_GAME).with_debug(format!(
                "{frames_shown} creatives shown in {}s, language {language}",
                elapsed.as_secs()
            )),
            Self::Interrupted {
                elapsed,
                index,
                orientation,
            } => AdResult::failure(provider, "orientation change").with_debug(format!(
                "switched to {orientation} after {}ms on creative {index}",
                elapsed.as_millis()
            )),
            Self::NotPortrait => AdResult::failure(provider, "orientation")
                .with_debug("rotate to portrait to watch"),
            Self::NoCreatives => AdResult::failure(provider, "no creatives"),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One playback of the creative carousel.
pub struct CarouselSession<'a> {
    provider: &'a str,
    creatives: &'a [CreativeEntry],
    language: Language,
    viewport: &'a Viewport,
    surface: Arc<dyn AdSurface>,
}

impl<'a> CarouselSession<'a> {
    /// Creates a session. `language` is fixed for the whole playback.
    pub fn new(
        provider: &'a str,
        creatives: &'a [CreativeEntry],
        language: Language,
        viewport: &'a Viewport,
        surface: Arc<dyn AdSurface>,
    ) -> Self {
        Self {
            provider,
            creatives,
            language,
            viewport,
            surface,
        }
    }

    fn frame(&self, index: usize) -> CreativeFrame {
        let creative = &self.creatives[index];
        CreativeFrame {
            index,
            name: creative.name.clone(),
            title: creative.title.get(self.language).to_string(),
            description: creative.description.get(self.language).to_string(),
            button_text: creative.button_text.get(self.language).to_string(),
            target_url: creative.target_url.clone(),
            image_url: creative.image_url.clone(),
            is_horizontal: creative.is_horizontal,
        }
    }

    /// Plays the carousel until it completes or is interrupted.
    pub async fn play(self) -> SessionOutcome {
        let count = self.creatives.len();
        if count == 0 {
            return SessionOutcome::NoCreatives;
        }
        if !self.viewport.is_portrait() {
            debug!(orientation = %self.viewport.orientation(), "Refusing to start outside portrait");
            return SessionOutcome::NotPortrait;
        }

        let total = CreativeEntry::total_duration(self.creatives);
        let start = Instant::now();

        let mut listener = self.viewport.subscribe();
        let modal = MountedModal::mount(
            Arc::clone(&self.surface),
            &ModalSpec {
                provider: self.provider.to_string(),
                creative_count: count,
                total_seconds: total.as_secs(),
            },
        );
        debug!(handle = modal.handle().0, count, total = ?total, language = %self.language, "Carousel started");

        let mut index = 0;
        let mut frames_shown = 1;
        modal.render(&self.frame(index));
        modal.countdown(total.as_secs());

        let aggregate = time::sleep_until(start + total);
        let step = time::sleep_until(start + self.creatives[index].duration());
        tokio::pin!(aggregate, step);

        let mut ticker = time::interval_at(start + COUNTDOWN_TICK, COUNTDOWN_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let outcome = loop {
            tokio::select! {
                biased;

                () = &mut aggregate => {
                    break SessionOutcome::Completed {
                        elapsed: start.elapsed(),
                        frames_shown,
                        language: self.language,
                    };
                }
                orientation = listener.left_portrait() => {
                    break SessionOutcome::Interrupted {
                        elapsed: start.elapsed(),
                        index,
                        orientation,
                    };
                }
                () = &mut step, if count > 1 => {
                    index = (index + 1) % count;
                    frames_shown += 1;
                    modal.render(&self.frame(index));
                    let next = step.deadline() + self.creatives[index].duration();
                    step.as_mut().reset(next);
                }
                _ = ticker.tick() => {
                    modal.countdown(total.saturating_sub(start.elapsed()).as_secs());
                }
            }
        };

        match &outcome {
            SessionOutcome::Completed { frames_shown, .. } => {
                info!(frames_shown, "Carousel completed");
            }
            SessionOutcome::Interrupted { elapsed, .. } => {
                warn!(elapsed = ?elapsed, "Carousel interrupted by orientation change");
            }
            _ => {}
        }
        outcome
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use adrelay_core::{LocalizedText, ViewportSize};
    use adrelay_fetch::{HeadlessSurface, SurfaceEvent};

    fn creative(name: &str, secs: u32) -> CreativeEntry {
        CreativeEntry {
            name: name.to_string(),
            title: LocalizedText::from([(Language::En, "Title"), (Language::Ru, "Заголовок")]),
            description: LocalizedText::new(),
            button_text: LocalizedText::from([(Language::En, "Go")]),
            target_url: "https://example.com".to_string(),
            image_url: "/img.webp".to_string(),
            duration_seconds: secs,
            is_horizontal: false,
        }
    }

    async fn play(
        creatives: &[CreativeEntry],
        viewport: &Viewport,
        surface: &Arc<HeadlessSurface>,
    ) -> SessionOutcome {
        CarouselSession::new("carousel", creatives, Language::En, viewport, surface.clone())
            .play()
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_creatives_complete_at_aggregate() {
        let creatives = vec![creative("a", 8), creative("b", 8), creative("c", 8)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let outcome = play(&creatives, &viewport, &surface).await;

        let SessionOutcome::Completed { elapsed, frames_shown, .. } = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(elapsed, Duration::from_secs(24));
        assert_eq!(frames_shown, 3);
        assert_eq!(surface.rendered_indices(), vec![0, 1, 2]);
        assert_eq!(surface.mounted_count(), 0);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_creative_never_steps() {
        let creatives = vec![creative("only", 5)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let outcome = play(&creatives, &viewport, &surface).await;

        assert!(outcome.is_completed());
        assert_eq!(surface.rendered_indices(), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uneven_durations_wrap_around() {
        // 2 + 10: creative 0 at 0s, 1 at 2s, wraps to 0 at 12s which is also
        // the aggregate deadline, so completion wins.
        let creatives = vec![creative("short", 2), creative("long", 10)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let outcome = play(&creatives, &viewport, &surface).await;

        assert!(outcome.is_completed());
        assert_eq!(surface.rendered_indices(), vec![0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_at_five_seconds() {
        let creatives = vec![creative("a", 8), creative("b", 8), creative("c", 8)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let rotator = viewport.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(5)).await;
            rotator.resize(ViewportSize::LANDSCAPE);
        });

        let outcome = play(&creatives, &viewport, &surface).await;
        assert_eq!(
            outcome,
            SessionOutcome::Interrupted {
                elapsed: Duration::from_secs(5),
                index: 0,
                orientation: Orientation::Landscape,
            }
        );
        assert_eq!(surface.mounted_count(), 0);
        assert_eq!(viewport.listener_count(), 0);

        // Nothing fires after the session has settled
        let settled = surface.event_count();
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(surface.event_count(), settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_within_portrait_does_not_interrupt() {
        let creatives = vec![creative("a", 4)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let resizer = viewport.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            resizer.resize(ViewportSize::new(400, 900));
        });

        assert!(play(&creatives, &viewport, &surface).await.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_landscape_refuses_without_mounting() {
        let creatives = vec![creative("a", 8)];
        let viewport = Viewport::landscape();
        let surface = Arc::new(HeadlessSurface::new());

        let outcome = play(&creatives, &viewport, &surface).await;

        assert_eq!(outcome, SessionOutcome::NotPortrait);
        assert_eq!(surface.event_count(), 0);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_creatives() {
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());
        assert_eq!(play(&[], &viewport, &surface).await, SessionOutcome::NoCreatives);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_down() {
        let creatives = vec![creative("a", 3)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        play(&creatives, &viewport, &surface).await;

        let countdown: Vec<u64> = surface
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Countdown { remaining_secs, .. } => Some(remaining_secs),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![3, 2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_language_is_applied_to_frames() {
        let creatives = vec![creative("a", 1)];
        let viewport = Viewport::portrait();
        let surface = Arc::new(HeadlessSurface::new());

        let outcome = CarouselSession::new("carousel", &creatives, Language::Ru, &viewport, surface.clone())
            .play()
            .await;

        let result = outcome.into_result("carousel");
        assert!(result.success);
        assert!(result.debug.unwrap().contains("language ru"));
    }

    #[test]
    fn test_outcome_results() {
        let interrupted = SessionOutcome::Interrupted {
            elapsed: Duration::from_millis(5000),
            index: 0,
            orientation: Orientation::Landscape,
        }
        .into_result("carousel");
        assert!(!interrupted.success);
        assert!(interrupted.reward.is_none());
        assert_eq!(interrupted.error.as_deref(), Some("orientation change"));
        assert!(interrupted.is_orientation_failure());

        let refused = SessionOutcome::NotPortrait.into_result("carousel");
        assert_eq!(refused.error.as_deref(), Some("orientation"));

        let empty = SessionOutcome::NoCreatives.into_result("carousel");
        assert_eq!(empty.error.as_deref(), Some("no creatives"));
    }
}
