//! Frame loop driving a trail animator
//!
//! The animator moves behind a shared lock. A tokio task ticks it once per
//! frame interval while pointer updates write into the same lock, so a frame
//! sees whatever pointer value was stored when it ran.

use crate::processing::easing::Point2D;
use crate::processing::trail::TrailAnimator;
use crate::render::marker::{Marker, MarkerStyle};
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running frame loop
///
/// Dropping the handle stops the loop; no further frames are scheduled.
pub struct FrameLoopHandle<M> {
    animator: Arc<ParkingMutex<TrailAnimator<M>>>,
    is_running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl<M> FrameLoopHandle<M>
where
    M: Marker + Send + 'static,
{
    /// Start ticking `animator` at its configured frame interval
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(animator: TrailAnimator<M>) -> Self {
        let interval = animator.config().frame_interval();
        Self::spawn_with_interval(animator, interval)
    }

    pub fn spawn_with_interval(animator: TrailAnimator<M>, interval: Duration) -> Self {
        // tokio rejects a zero period
        let interval = interval.max(Duration::from_millis(1));
        let animator = Arc::new(ParkingMutex::new(animator));
        let is_running = Arc::new(AtomicBool::new(true));

        let task = tokio::spawn(run_frames(animator.clone(), is_running.clone(), interval));

        tracing::info!("Trail frame loop started ({:?} per frame)", interval);

        Self {
            animator,
            is_running,
            task: Some(task),
        }
    }
}

impl<M> FrameLoopHandle<M> {
    /// Overwrite the stored pointer position
    pub fn pointer_moved(&self, x: f64, y: f64) {
        self.animator.lock().pointer_moved(x, y);
    }

    pub fn pointer(&self) -> Point2D {
        self.animator.lock().pointer()
    }

    /// Styles applied on the most recent frame
    pub fn snapshot(&self) -> Vec<MarkerStyle> {
        self.animator.lock().styles()
    }

    pub fn frames(&self) -> u64 {
        self.animator.lock().frames()
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Stop scheduling frames and wait for the loop task to finish
    pub async fn stop(mut self) {
        self.is_running.store(false, Ordering::SeqCst);

        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!("Trail frame loop ended abnormally: {}", e);
                }
            }
        }

        tracing::info!("Trail frame loop stopped after {} frames", self.frames());
    }
}

impl<M> Drop for FrameLoopHandle<M> {
    fn drop(&mut self) {
        self.is_running.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_frames<M: Marker>(
    animator: Arc<ParkingMutex<TrailAnimator<M>>>,
    is_running: Arc<AtomicBool>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !is_running.load(Ordering::SeqCst) {
            break;
        }
        animator.lock().tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailConfig;
    use crate::render::marker::StyleMarker;

    fn animator() -> TrailAnimator<StyleMarker> {
        TrailAnimator::with_pointer(
            TrailConfig::default(),
            Point2D::new(0.0, 0.0),
            StyleMarker::new,
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_interval() {
        let handle = FrameLoopHandle::spawn(animator());

        // First tick fires immediately, then one per 16ms
        tokio::time::sleep(Duration::from_millis(16 * 10 + 1)).await;

        let frames = handle.frames();
        assert!((10..=11).contains(&frames), "unexpected frame count {}", frames);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_updates_reach_frames() {
        let handle = FrameLoopHandle::spawn(animator());
        handle.pointer_moved(100.0, 100.0);
        assert_eq!(handle.pointer(), Point2D::new(100.0, 100.0));

        tokio::time::sleep(Duration::from_secs(1)).await;

        let head = handle.snapshot()[0];
        assert!((head.x - 100.0).abs() < 0.01, "head x {}", head.x);
        assert!((head.y - 100.0).abs() < 0.01, "head y {}", head.y);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_frame_uses_latest_pointer() {
        let handle = FrameLoopHandle::spawn(animator());
        tokio::time::sleep(Duration::from_millis(1)).await;
        let before = handle.frames();

        handle.pointer_moved(40.0, 0.0);
        handle.pointer_moved(100.0, -100.0);
        tokio::time::sleep(Duration::from_millis(16)).await;

        assert_eq!(handle.frames(), before + 1);
        let head = handle.snapshot()[0];
        assert!((head.x - 45.0).abs() < 1e-9, "head x {}", head.x);
        assert!((head.y + 45.0).abs() < 1e-9, "head y {}", head.y);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_frames() {
        let handle = FrameLoopHandle::spawn(animator());
        tokio::time::sleep(Duration::from_millis(100)).await;

        let observer = handle.animator.clone();
        assert!(handle.is_running());
        handle.stop().await;

        let stopped_at = observer.lock().frames();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(observer.lock().frames(), stopped_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_halts_frames() {
        let handle = FrameLoopHandle::spawn(animator());
        let observer = handle.animator.clone();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(handle);

        tokio::task::yield_now().await;
        let stopped_at = observer.lock().frames();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(observer.lock().frames(), stopped_at);
    }
}
