// =====
// TESTS: 21
// =====
//
// Chat scroll scheduling: stick/hold decisions, force-once, coalescing,
// delayed re-stick and target fallbacks, driven through the public controller.

use pretty_assertions::assert_eq;
use sticky_scroll::host::sim::{SimElement, SimHost};
use sticky_scroll::host::{
    FixedMotion, Overflow, Platform, Region, ScrollBehavior, ScrollElement, TickFrames,
    TimerFrames,
};
use sticky_scroll::scroll::ScrollController;
use std::rc::Rc;
use std::time::Duration;

use crate::helpers::{ChatFixture, finish_draw, local, run_frames, settle};

// --- Stick / hold ---

#[tokio::test(start_paused = true)]
async fn append_while_near_bottom_sticks_to_scroll_height() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.schedule_chat_scroll(false, false);
        run_frames().await;

        assert_eq!(fx.thread.scroll_top(), 2000.0);
        let chat = fx.ctl.chat();
        assert!(chat.user_near_bottom);
        assert!(!chat.new_content_below);
        assert!(!chat.has_auto_scrolled, "a plain stick does not consume the force");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn append_while_scrolled_away_holds_and_flags_new_content() {
    local(async {
        let fx = ChatFixture::new(2000.0, 500.0, 400.0).reading_above();
        fx.ctl.schedule_chat_scroll(false, false);
        settle().await;

        assert_eq!(fx.thread.scroll_top(), 500.0);
        assert_eq!(fx.thread.scroll_writes(), 0);
        assert!(fx.ctl.chat().new_content_below);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn fresh_geometry_rescues_a_stale_away_flag() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.chat_mut().has_auto_scrolled = true;
        fx.ctl.chat_mut().user_near_bottom = false;
        fx.ctl.schedule_chat_scroll(false, false);
        run_frames().await;

        assert_eq!(fx.thread.scroll_top(), 2000.0);
        assert!(fx.ctl.chat().user_near_bottom);
    })
    .await;
}

// --- Force once per session ---

#[tokio::test(start_paused = true)]
async fn force_on_fresh_session_scrolls_even_when_away() {
    local(async {
        let fx = ChatFixture::new(2000.0, 0.0, 400.0);
        fx.user_scrolled();
        assert!(!fx.ctl.chat().user_near_bottom);

        fx.ctl.schedule_chat_scroll(true, false);
        run_frames().await;

        assert_eq!(fx.thread.scroll_top(), 2000.0);
        let chat = fx.ctl.chat();
        assert!(chat.has_auto_scrolled);
        assert!(chat.user_near_bottom);
        assert!(!chat.new_content_below);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn force_after_first_auto_scroll_respects_user_scroll_up() {
    local(async {
        let fx = ChatFixture::new(2000.0, 0.0, 400.0);
        fx.ctl.schedule_chat_scroll(true, false);
        settle().await;
        assert!(fx.ctl.chat().has_auto_scrolled);

        fx.user_scroll_to(0.0);
        let writes = fx.thread.scroll_writes();
        fx.ctl.schedule_chat_scroll(true, false);
        settle().await;

        assert_eq!(fx.thread.scroll_top(), 0.0);
        assert_eq!(fx.thread.scroll_writes(), writes);
        assert!(fx.ctl.chat().new_content_below);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn reset_restores_force_for_the_next_session() {
    local(async {
        let fx = ChatFixture::new(2000.0, 0.0, 400.0);
        fx.ctl.schedule_chat_scroll(true, false);
        settle().await;
        fx.user_scroll_to(0.0);

        fx.ctl.reset_chat_scroll();
        let chat = fx.ctl.chat();
        assert_eq!(
            (chat.has_auto_scrolled, chat.user_near_bottom, chat.new_content_below),
            (false, true, false)
        );
        drop(chat);

        fx.ctl.chat_mut().user_near_bottom = false;
        fx.ctl.schedule_chat_scroll(true, false);
        run_frames().await;
        assert_eq!(fx.thread.scroll_top(), 2000.0);
    })
    .await;
}

// --- Coalescing ---

#[tokio::test(start_paused = true)]
async fn rapid_appends_while_scrolled_up_leave_position_unchanged() {
    local(async {
        let fx = ChatFixture::new(2000.0, 500.0, 400.0).reading_above();
        for _ in 0..3 {
            fx.ctl.schedule_chat_scroll(false, true);
        }
        settle().await;

        assert_eq!(fx.thread.scroll_top(), 500.0);
        assert_eq!(fx.thread.scroll_writes(), 0);
        assert!(fx.ctl.chat().new_content_below);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn burst_of_appends_runs_one_frame_and_one_retry() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        for _ in 0..5 {
            fx.ctl.schedule_chat_scroll(false, false);
        }
        assert!(fx.ctl.chat().has_pending_frame());
        settle().await;

        // one scroll from the frame step, one from the retry
        assert_eq!(fx.thread.scroll_writes(), 2);
        assert!(!fx.ctl.chat().has_pending_frame());
        assert!(!fx.ctl.chat().has_pending_retry());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn new_request_cancels_pending_retry() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.schedule_chat_scroll(false, false);
        run_frames().await;
        assert!(fx.ctl.chat().has_pending_retry());

        fx.ctl.schedule_chat_scroll(false, false);
        assert!(!fx.ctl.chat().has_pending_retry(), "superseded retry is dropped at once");
        settle().await;
        assert_eq!(fx.thread.scroll_writes(), 3);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn streaming_faster_than_frames_scrolls_every_few_frames() {
    local(async {
        let frames = Rc::new(TickFrames::new());
        let fx = ChatFixture::with(2000.0, 1600.0, 400.0, frames.clone());
        let (mut seen_writes, mut idle, mut longest_idle) = (0, 0, 0);
        let mut worst_distance = 0.0_f64;

        // appends every 10 ms, draws every 16 ms, for one second
        for ms in (0..1000).step_by(2) {
            // the element clamps what the last frame wrote
            fx.thread.clamp_scroll();
            if ms % 10 == 0 {
                fx.thread.set_scroll_height(fx.thread.scroll_height() + 18.0);
                fx.host.render_gate().invalidate();
                fx.ctl.schedule_chat_scroll(false, false);
            }
            if ms % 16 == 0 {
                worst_distance = worst_distance.max(fx.thread.geometry().distance_from_bottom());
                let writes = fx.thread.scroll_writes();
                if writes > seen_writes {
                    seen_writes = writes;
                    idle = 0;
                } else {
                    idle += 1;
                }
                longest_idle = longest_idle.max(idle);
                finish_draw(&fx.host, &frames);
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert!(seen_writes >= 20, "only {seen_writes} scrolls in 62 frames");
        assert!(longest_idle <= 3, "{longest_idle} frames without a scroll");
        assert!(worst_distance < 150.0, "fell {worst_distance}px behind");
        let chat = fx.ctl.chat();
        assert!(chat.user_near_bottom);
        assert!(!chat.new_content_below);
    })
    .await;
}

// --- Delayed re-stick ---

#[tokio::test(start_paused = true)]
async fn retry_resticks_after_late_content_growth() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.schedule_chat_scroll(false, false);
        run_frames().await;
        assert_eq!(fx.thread.scroll_top(), 2000.0);

        // layout clamps, then an image finishes loading
        fx.thread.clamp_scroll();
        fx.thread.set_scroll_height(2600.0);
        settle().await;

        assert_eq!(fx.thread.scroll_top(), 2600.0);
        assert!(fx.ctl.chat().user_near_bottom);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn retry_does_not_fight_a_user_who_scrolled_away() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.schedule_chat_scroll(false, false);
        run_frames().await;

        fx.thread.set_scroll_height(2600.0);
        fx.user_scroll_to(0.0);
        settle().await;

        assert_eq!(fx.thread.scroll_top(), 0.0);
        assert_eq!(fx.thread.scroll_writes(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn forced_retry_waits_longer_and_keeps_the_force() {
    local(async {
        let fx = ChatFixture::new(2000.0, 0.0, 400.0);
        fx.ctl.schedule_chat_scroll(true, false);
        run_frames().await;
        assert_eq!(fx.thread.scroll_writes(), 1);

        fx.thread.set_scroll_height(2600.0);
        fx.user_scroll_to(0.0);

        tokio::time::sleep(Duration::from_millis(125)).await;
        assert_eq!(fx.thread.scroll_top(), 0.0, "retry on the forced path waits 150 ms");

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(fx.thread.scroll_top(), 2600.0);
        assert!(fx.ctl.chat().user_near_bottom);
    })
    .await;
}

// --- Render and frame gating ---

#[tokio::test(start_paused = true)]
async fn scroll_waits_for_render_completion() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.host.render_gate().invalidate();
        fx.ctl.schedule_chat_scroll(false, false);
        settle().await;
        assert_eq!(fx.thread.scroll_writes(), 0);

        fx.host.render_gate().mark_rendered();
        run_frames().await;
        assert_eq!(fx.thread.scroll_top(), 2000.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn scroll_waits_for_the_next_frame() {
    local(async {
        let frames = Rc::new(TickFrames::new());
        let fx = ChatFixture::with(2000.0, 1600.0, 400.0, frames.clone());
        fx.ctl.schedule_chat_scroll(false, false);
        settle().await;
        assert_eq!(fx.thread.scroll_writes(), 0);

        frames.tick();
        run_frames().await;
        assert_eq!(fx.thread.scroll_top(), 2000.0);
    })
    .await;
}

// --- Behavior ---

#[tokio::test(start_paused = true)]
async fn smooth_request_animates_when_motion_is_allowed() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0);
        fx.ctl.schedule_chat_scroll(false, true);
        run_frames().await;
        assert_eq!(fx.thread.last_behavior(), Some(ScrollBehavior::Smooth));
        assert!(fx.thread.is_animating());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn reduced_motion_downgrades_smooth_to_instant() {
    local(async {
        let fx = ChatFixture::new(2000.0, 1600.0, 400.0)
            .platform(Platform::headless().with_reduced_motion(Rc::new(FixedMotion(true))));
        fx.ctl.schedule_chat_scroll(false, true);
        run_frames().await;
        assert_eq!(fx.thread.last_behavior(), Some(ScrollBehavior::Instant));
        assert_eq!(fx.thread.scroll_top(), 2000.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn element_without_animation_jumps() {
    local(async {
        let host = Rc::new(SimHost::new());
        let thread = SimElement::new(2000.0, 1600.0, 400.0).without_animation().shared();
        host.insert(Region::ChatThread, Rc::clone(&thread));
        let ctl = ScrollController::new(Rc::clone(&host), Rc::new(TimerFrames::new()));
        ctl.schedule_chat_scroll(false, true);
        run_frames().await;
        assert_eq!(thread.scroll_top(), 2000.0);
        assert!(!thread.is_animating());
    })
    .await;
}

// --- Target resolution ---

#[tokio::test(start_paused = true)]
async fn non_scrolling_thread_falls_back_to_scrolling_element() {
    local(async {
        let host = Rc::new(SimHost::new());
        let thread =
            SimElement::new(400.0, 0.0, 400.0).with_overflow(Overflow::Visible).shared();
        let document = SimElement::new(3000.0, 2600.0, 400.0).shared();
        host.insert(Region::ChatThread, Rc::clone(&thread));
        host.set_scrolling_element(Some(Rc::clone(&document)));
        let ctl = ScrollController::new(Rc::clone(&host), Rc::new(TimerFrames::new()));

        ctl.schedule_chat_scroll(false, false);
        run_frames().await;
        assert_eq!(document.scroll_top(), 3000.0);
        assert_eq!(thread.scroll_writes(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn missing_thread_and_scroller_fall_back_to_root() {
    local(async {
        let host = Rc::new(SimHost::new());
        let root = SimElement::new(3000.0, 2600.0, 400.0).shared();
        host.set_root_element(Some(Rc::clone(&root)));
        let ctl = ScrollController::new(Rc::clone(&host), Rc::new(TimerFrames::new()));

        ctl.schedule_chat_scroll(false, false);
        run_frames().await;
        assert_eq!(root.scroll_top(), 3000.0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn no_target_is_a_silent_no_op() {
    local(async {
        let host = Rc::new(SimHost::new());
        let ctl = ScrollController::new(Rc::clone(&host), Rc::new(TimerFrames::new()));
        ctl.chat_mut().user_near_bottom = false;
        ctl.schedule_chat_scroll(true, false);
        settle().await;

        let chat = ctl.chat();
        assert!(!chat.has_auto_scrolled, "force is kept for a later request");
        assert!(!chat.user_near_bottom);
        assert!(!chat.new_content_below);
        assert!(!chat.has_pending_retry());
    })
    .await;
}
