// =====
// TESTS: 7
// =====
//
// Log stream following: 80 px threshold, force, coalescing, no retry.

use pretty_assertions::assert_eq;
use std::rc::Rc;
use std::time::Duration;
use sticky_scroll::host::sim::{SimElement, SimHost};
use sticky_scroll::host::{FrameClock, Region, ScrollElement, TickFrames, TimerFrames};
use sticky_scroll::scroll::{ScrollController, ScrollEvent};

use crate::helpers::{finish_draw, local, run_frames, settle};

fn logs_fixture(
    scroll_height: f64,
    scroll_top: f64,
    client_height: f64,
) -> (ScrollController<SimHost>, Rc<SimElement>) {
    logs_fixture_with(scroll_height, scroll_top, client_height, Rc::new(TimerFrames::new()))
}

fn logs_fixture_with(
    scroll_height: f64,
    scroll_top: f64,
    client_height: f64,
    frames: Rc<dyn FrameClock>,
) -> (ScrollController<SimHost>, Rc<SimElement>) {
    let host = Rc::new(SimHost::new());
    let stream = SimElement::new(scroll_height, scroll_top, client_height).shared();
    host.insert(Region::LogStream, Rc::clone(&stream));
    (ScrollController::new(host, frames), stream)
}

#[tokio::test(start_paused = true)]
async fn follows_when_within_80px() {
    local(async {
        let (ctl, stream) = logs_fixture(1000.0, 530.0, 400.0);
        ctl.schedule_logs_scroll(false);
        run_frames().await;
        assert_eq!(stream.scroll_top(), 1000.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn holds_at_exactly_80px() {
    local(async {
        let (ctl, stream) = logs_fixture(1000.0, 520.0, 400.0);
        ctl.schedule_logs_scroll(false);
        settle().await;
        assert_eq!(stream.scroll_top(), 520.0);
        assert_eq!(stream.scroll_writes(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn force_follows_from_anywhere() {
    local(async {
        let (ctl, stream) = logs_fixture(1000.0, 0.0, 400.0);
        ctl.schedule_logs_scroll(true);
        run_frames().await;
        assert_eq!(stream.scroll_top(), 1000.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn burst_coalesces_into_one_write_and_no_retry() {
    local(async {
        let (ctl, stream) = logs_fixture(1000.0, 600.0, 400.0);
        for _ in 0..4 {
            ctl.schedule_logs_scroll(false);
        }
        run_frames().await;
        assert_eq!(stream.scroll_writes(), 1);
        assert!(!ctl.logs().has_pending_frame());

        stream.set_scroll_height(1500.0);
        settle().await;
        assert_eq!(stream.scroll_top(), 1000.0, "logs have no delayed re-stick");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn steady_log_stream_stays_pinned_between_frames() {
    local(async {
        let frames = Rc::new(TickFrames::new());
        let (ctl, stream) = logs_fixture_with(1000.0, 600.0, 400.0, frames.clone());
        let host = Rc::clone(ctl.host());
        let mut drawn = 0;

        // a 10 px line every 10 ms, draws every 16 ms
        for ms in (0..1000).step_by(2) {
            stream.clamp_scroll();
            if ms % 10 == 0 {
                stream.set_scroll_height(stream.scroll_height() + 10.0);
                host.render_gate().invalidate();
                ctl.schedule_logs_scroll(false);
            }
            if ms % 16 == 0 {
                assert!(
                    stream.geometry().distance_from_bottom() < 80.0,
                    "lost the tail at {ms} ms"
                );
                finish_draw(&host, &frames);
                drawn += 1;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert!(stream.scroll_writes() >= drawn / 3, "{} writes", stream.scroll_writes());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn missing_log_region_is_a_no_op() {
    local(async {
        let host = Rc::new(SimHost::new());
        let chat = SimElement::new(1000.0, 0.0, 400.0).shared();
        host.insert(Region::ChatThread, Rc::clone(&chat));
        let ctl = ScrollController::new(host, Rc::new(TimerFrames::new()));
        ctl.schedule_logs_scroll(true);
        settle().await;
        assert_eq!(chat.scroll_writes(), 0, "logs never fall back to other regions");
    })
    .await;
}

#[test]
fn scroll_events_track_at_bottom() {
    let (ctl, stream) = logs_fixture(1000.0, 600.0, 400.0);
    assert!(ctl.logs().at_bottom);

    stream.user_scroll_to(300.0);
    ctl.handle_logs_scroll(&ScrollEvent::from_element(stream.as_ref()));
    assert!(!ctl.logs().at_bottom);

    stream.user_scroll_to(550.0);
    ctl.handle_logs_scroll(&ScrollEvent::from_element(stream.as_ref()));
    assert!(ctl.logs().at_bottom);

    ctl.handle_logs_scroll(&ScrollEvent::detached());
    assert!(ctl.logs().at_bottom);
}
