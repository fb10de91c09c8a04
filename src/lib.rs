//! Page Trail - interactive decorations for a web page.
//!
//! The centerpiece is a cursor-following particle trail driven once per frame.
//! Alongside it live the page's smaller helpers: a toast, clipboard copy with
//! fallback, a popup container with a search popup, and a clock/uptime display.

pub mod config;
pub mod page;
pub mod processing;
pub mod render;
pub mod scheduler;

use config::{TrailConfig, TrailResult};
use processing::trail::{TrailAnimator, Viewport};
use render::marker::{MarkerStyle, StyleMarker};
use scheduler::FrameLoopHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_trail=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Viewport used by the headless demo
pub const DEMO_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

/// Run the trail headlessly for `frames` frames
///
/// The pointer circles the viewport center once per second. Returns the
/// styles applied on the last frame.
pub async fn run_demo(config: TrailConfig, frames: u64) -> TrailResult<Vec<MarkerStyle>> {
    tracing::info!("Starting Page Trail v{}", env!("CARGO_PKG_VERSION"));

    let interval = config.frame_interval();
    let animator = TrailAnimator::new(config, DEMO_VIEWPORT, StyleMarker::new)?;
    let handle = FrameLoopHandle::spawn(animator);

    let center = DEMO_VIEWPORT.center();
    let radius = DEMO_VIEWPORT.height / 4.0;
    let frames_per_turn = (1.0 / interval.as_secs_f64()).max(1.0);

    let mut pointer_ticker = tokio::time::interval(interval);
    for frame in 0..frames {
        pointer_ticker.tick().await;
        let angle = frame as f64 / frames_per_turn * std::f64::consts::TAU;
        handle.pointer_moved(center.x + radius * angle.cos(), center.y + radius * angle.sin());

        if frame % 60 == 0 {
            let head = handle.snapshot()[0];
            tracing::debug!(
                "frame {}: head at ({:.1}, {:.1}) hue {:.0}",
                handle.frames(),
                head.x,
                head.y,
                head.hue
            );
        }
    }

    let styles = handle.snapshot();
    handle.stop().await;
    Ok(styles)
}
