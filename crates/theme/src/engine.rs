//! Fetch-and-apply engine with stale-completion protection.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pagerodeo_core::StyleTarget;

use crate::config::{PaletteConfig, TypographyConfig};
use crate::source::{ConfigSource, ThemeError};

/// Quiet period after a route change before the engine re-fetches; rapid
/// successive navigations collapse into one refresh.
pub const NAVIGATION_DEBOUNCE: Duration = Duration::from_millis(100);

/// Lifecycle of one themed surface (palette or typography).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Never fetched.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The most recent completion was applied.
    Applied,
    /// The most recent completion failed; any earlier applied snapshot
    /// is still on the target.
    Failed,
}

struct Applied<T> {
    seq: u64,
    at: DateTime<Utc>,
    config: T,
}

struct Slot<T> {
    state: FetchState,
    last: Option<Applied<T>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            state: FetchState::Idle,
            last: None,
        }
    }

    /// Seq of the newest applied snapshot, if any.
    fn applied_seq(&self) -> Option<u64> {
        self.last.as_ref().map(|applied| applied.seq)
    }
}

struct EngineInner {
    source: Arc<dyn ConfigSource>,
    target: Arc<dyn StyleTarget>,
    seq: AtomicU64,
    debounce_gen: AtomicU64,
    palette: Mutex<Slot<PaletteConfig>>,
    typography: Mutex<Slot<TypographyConfig>>,
}

/// Fetches the active palette and site typography and writes them onto the
/// injected [`StyleTarget`] as CSS custom properties.
///
/// # Invariants
///
/// - Responses that complete out of order never regress the target: every
///   fetch is stamped with a monotonic sequence number and a completion is
///   dropped when a newer one has already been applied.
/// - A failed fetch leaves the last applied snapshot untouched.
/// - Palette and typography succeed or fail independently.
#[derive(Clone)]
pub struct ThemeEngine {
    inner: Arc<EngineInner>,
}

impl ThemeEngine {
    pub fn new(source: Arc<dyn ConfigSource>, target: Arc<dyn StyleTarget>) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                source,
                target,
                seq: AtomicU64::new(0),
                debounce_gen: AtomicU64::new(0),
                palette: Mutex::new(Slot::new()),
                typography: Mutex::new(Slot::new()),
            }),
        }
    }

    /// Fetch both configs and apply whichever completes, each guarded by
    /// its own sequence check. Awaits both completions.
    pub async fn refresh(&self) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;

        set_loading(&self.inner.palette);
        set_loading(&self.inner.typography);

        let palette = async {
            let outcome = self.inner.source.active_palette().await;
            self.apply_palette(seq, outcome);
        };
        let typography = async {
            let outcome = self.inner.source.site_typography().await;
            self.apply_typography(seq, outcome);
        };
        tokio::join!(palette, typography);
    }

    /// Schedule a refresh after [`NAVIGATION_DEBOUNCE`]; a newer call within
    /// the window supersedes this one. In-flight fetches are never aborted,
    /// the sequence guard disposes of their completions instead.
    ///
    /// Needs a tokio runtime for the timer; without one the refetch is
    /// skipped with a warning (the next `refresh` still applies).
    pub fn on_route_change(&self) {
        let generation = self.inner.debounce_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime, skipping navigation theme refetch");
            return;
        };
        let engine = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(NAVIGATION_DEBOUNCE).await;
            if engine.inner.debounce_gen.load(Ordering::SeqCst) == generation {
                engine.refresh().await;
            }
        });
    }

    pub fn palette_state(&self) -> FetchState {
        lock(&self.inner.palette).state
    }

    pub fn typography_state(&self) -> FetchState {
        lock(&self.inner.typography).state
    }

    /// The last applied palette, with the instant it was applied.
    pub fn last_palette(&self) -> Option<(PaletteConfig, DateTime<Utc>)> {
        lock(&self.inner.palette)
            .last
            .as_ref()
            .map(|applied| (applied.config.clone(), applied.at))
    }

    fn apply_palette(&self, seq: u64, outcome: Result<PaletteConfig, ThemeError>) {
        match outcome {
            Ok(config) => {
                let mut slot = lock(&self.inner.palette);
                if slot.applied_seq() > Some(seq) {
                    tracing::debug!(seq, "discarding stale palette response");
                    return;
                }
                for (name, value) in config.css_properties() {
                    self.inner.target.set_property(name, value);
                }
                tracing::debug!(palette = %config.name, "palette applied");
                slot.state = FetchState::Applied;
                slot.last = Some(Applied {
                    seq,
                    at: Utc::now(),
                    config,
                });
            }
            Err(error) => {
                tracing::warn!(%error, "palette fetch failed");
                let mut slot = lock(&self.inner.palette);
                if slot.applied_seq() > Some(seq) {
                    return;
                }
                slot.state = FetchState::Failed;
            }
        }
    }

    fn apply_typography(&self, seq: u64, outcome: Result<TypographyConfig, ThemeError>) {
        match outcome {
            Ok(config) => {
                let mut slot = lock(&self.inner.typography);
                if slot.applied_seq() > Some(seq) {
                    tracing::debug!(seq, "discarding stale typography response");
                    return;
                }
                for (name, value) in config.css_properties() {
                    self.inner.target.set_property(name, value);
                }
                tracing::debug!("typography applied");
                slot.state = FetchState::Applied;
                slot.last = Some(Applied {
                    seq,
                    at: Utc::now(),
                    config,
                });
            }
            Err(error) => {
                tracing::warn!(%error, "typography fetch failed");
                let mut slot = lock(&self.inner.typography);
                if slot.applied_seq() > Some(seq) {
                    return;
                }
                slot.state = FetchState::Failed;
            }
        }
    }
}

fn set_loading<T>(slot: &Mutex<Slot<T>>) {
    lock(slot).state = FetchState::Loading;
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> std::sync::MutexGuard<'_, Slot<T>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use pagerodeo_core::MemoryStyleTarget;

    use crate::source::FixedConfigSource;

    use super::*;

    fn sample_palette(name: &str, primary: &str) -> PaletteConfig {
        PaletteConfig {
            name: name.to_string(),
            primary: primary.to_string(),
            primary_hover: "#243b53".to_string(),
            secondary: "#d9e2ec".to_string(),
            secondary_hover: "#bcccdc".to_string(),
            accent_1: "#f0b429".to_string(),
            accent_2: "#de911d".to_string(),
            accent_3: "#cb6e17".to_string(),
        }
    }

    fn sample_typography() -> TypographyConfig {
        TypographyConfig {
            font_body: "Inter, sans-serif".to_string(),
            font_heading: "Sora, sans-serif".to_string(),
            size_base: "1rem".to_string(),
            size_h1: "2.5rem".to_string(),
            size_h2: "2rem".to_string(),
            size_h3: "1.75rem".to_string(),
            size_h4: "1.5rem".to_string(),
            size_h5: "1.25rem".to_string(),
            size_h6: "1.125rem".to_string(),
        }
    }

    fn fixed_source() -> Arc<FixedConfigSource> {
        Arc::new(FixedConfigSource::new(
            sample_palette("midnight", "#102a43"),
            sample_typography(),
        ))
    }

    /// Source whose Nth palette response carries its own delay and payload,
    /// for exercising out-of-order completions.
    struct ScriptedSource {
        responses: Vec<(Duration, Result<PaletteConfig, u16>)>,
        next: AtomicUsize,
        typography: TypographyConfig,
    }

    impl ScriptedSource {
        fn new(responses: Vec<(Duration, Result<PaletteConfig, u16>)>) -> Self {
            Self {
                responses,
                next: AtomicUsize::new(0),
                typography: sample_typography(),
            }
        }
    }

    #[async_trait]
    impl ConfigSource for ScriptedSource {
        async fn active_palette(&self) -> Result<PaletteConfig, ThemeError> {
            let index = self.next.fetch_add(1, Ordering::SeqCst);
            let (delay, outcome) = self.responses[index].clone();
            tokio::time::sleep(delay).await;
            outcome.map_err(ThemeError::Status)
        }

        async fn site_typography(&self) -> Result<TypographyConfig, ThemeError> {
            Ok(self.typography.clone())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_applies_both_surfaces() {
        let target = Arc::new(MemoryStyleTarget::new());
        let engine = ThemeEngine::new(fixed_source(), Arc::clone(&target) as _);

        assert_eq!(engine.palette_state(), FetchState::Idle);
        engine.refresh().await;

        assert_eq!(engine.palette_state(), FetchState::Applied);
        assert_eq!(engine.typography_state(), FetchState::Applied);
        assert_eq!(
            target.property("--color-primary"),
            Some("#102a43".to_string())
        );
        assert_eq!(
            target.property("--font-body"),
            Some("Inter, sans-serif".to_string())
        );
        assert_eq!(target.property_count(), 16);
    }

    #[tokio::test(start_paused = true)]
    async fn reapplying_the_same_config_is_idempotent() {
        let target = Arc::new(MemoryStyleTarget::new());
        let engine = ThemeEngine::new(fixed_source(), Arc::clone(&target) as _);

        engine.refresh().await;
        let first = target.properties();
        engine.refresh().await;

        assert_eq!(target.properties(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_the_last_applied_snapshot() {
        let source = Arc::new(ScriptedSource::new(vec![
            (Duration::ZERO, Ok(sample_palette("midnight", "#102a43"))),
            (Duration::ZERO, Err(503)),
        ]));
        let target = Arc::new(MemoryStyleTarget::new());
        let engine = ThemeEngine::new(source, Arc::clone(&target) as _);

        engine.refresh().await;
        assert_eq!(engine.palette_state(), FetchState::Applied);

        engine.refresh().await;

        assert_eq!(engine.palette_state(), FetchState::Failed);
        // Typography keeps succeeding, independently.
        assert_eq!(engine.typography_state(), FetchState::Applied);
        // The failed fetch did not disturb the applied colors.
        assert_eq!(
            target.property("--color-primary"),
            Some("#102a43".to_string())
        );
        let (last, _) = engine.last_palette().unwrap();
        assert_eq!(last.name, "midnight");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_completion_never_overwrites_a_newer_one() {
        // First fetch answers slowly with "stale", second answers fast with
        // "fresh". The slow response lands last and must be dropped.
        let source = Arc::new(ScriptedSource::new(vec![
            (
                Duration::from_millis(500),
                Ok(sample_palette("stale", "#aaaaaa")),
            ),
            (
                Duration::from_millis(10),
                Ok(sample_palette("fresh", "#bbbbbb")),
            ),
        ]));
        let target = Arc::new(MemoryStyleTarget::new());
        let engine = ThemeEngine::new(source, Arc::clone(&target) as _);

        let slow = tokio::spawn({
            let engine = engine.clone();
            async move { engine.refresh().await }
        });
        tokio::task::yield_now().await;
        let fast = tokio::spawn({
            let engine = engine.clone();
            async move { engine.refresh().await }
        });

        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        assert_eq!(engine.palette_state(), FetchState::Applied);
        assert_eq!(
            target.property("--color-primary"),
            Some("#bbbbbb".to_string())
        );
        let (last, _) = engine.last_palette().unwrap();
        assert_eq!(last.name, "fresh");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_failure_cannot_mark_a_newer_success_failed() {
        let source = Arc::new(ScriptedSource::new(vec![
            (Duration::from_millis(500), Err(502)),
            (
                Duration::from_millis(10),
                Ok(sample_palette("fresh", "#bbbbbb")),
            ),
        ]));
        let target = Arc::new(MemoryStyleTarget::new());
        let engine = ThemeEngine::new(source, Arc::clone(&target) as _);

        let slow = tokio::spawn({
            let engine = engine.clone();
            async move { engine.refresh().await }
        });
        tokio::task::yield_now().await;
        let fast = tokio::spawn({
            let engine = engine.clone();
            async move { engine.refresh().await }
        });

        let (slow, fast) = tokio::join!(slow, fast);
        slow.unwrap();
        fast.unwrap();

        assert_eq!(engine.palette_state(), FetchState::Applied);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_navigations_collapse_into_one_refresh() {
        let source = fixed_source();
        let engine = ThemeEngine::new(
            Arc::clone(&source) as Arc<dyn ConfigSource>,
            Arc::new(MemoryStyleTarget::new()),
        );

        engine.on_route_change();
        tokio::time::sleep(NAVIGATION_DEBOUNCE / 2).await;
        engine.on_route_change();
        tokio::time::sleep(NAVIGATION_DEBOUNCE * 2).await;

        assert_eq!(source.palette_calls(), 1);
        assert_eq!(source.typography_calls(), 1);
        assert_eq!(engine.palette_state(), FetchState::Applied);
    }

    #[test]
    fn route_change_without_a_runtime_is_a_no_op() {
        let source = fixed_source();
        let engine = ThemeEngine::new(
            Arc::clone(&source) as Arc<dyn ConfigSource>,
            Arc::new(MemoryStyleTarget::new()),
        );

        // Plain sync context, no runtime anywhere.
        engine.on_route_change();

        assert_eq!(source.palette_calls(), 0);
        assert_eq!(engine.palette_state(), FetchState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_navigations_each_refresh() {
        let source = fixed_source();
        let engine = ThemeEngine::new(
            Arc::clone(&source) as Arc<dyn ConfigSource>,
            Arc::new(MemoryStyleTarget::new()),
        );

        engine.on_route_change();
        tokio::time::sleep(NAVIGATION_DEBOUNCE * 2).await;
        engine.on_route_change();
        tokio::time::sleep(NAVIGATION_DEBOUNCE * 2).await;

        assert_eq!(source.palette_calls(), 2);
    }
}
