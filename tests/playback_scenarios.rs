// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios driven through a session, with the tokio clock paused.

use player_controls::config::{Config, VideoSource};
use player_controls::coordinator::{HostCallbacks, HostRequest, Input, Visibility};
use player_controls::domain::{Opacity, ScreenOrientation};
use player_controls::format::format_progress;
use player_controls::overlay::Message;
use player_controls::player::{NativeEvent, PlayerCommand};
use player_controls::session::{Session, SessionHandle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type Recorder = mpsc::UnboundedSender<PlayerCommand>;

struct Scenario {
    session: Session<Recorder>,
    handle: SessionHandle,
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
}

impl Scenario {
    fn start(config: Config) -> Self {
        Self::with_callbacks(config, HostCallbacks::new())
    }

    fn with_callbacks(config: Config, callbacks: HostCallbacks) -> Self {
        let (player, commands) = mpsc::unbounded_channel();
        let (session, handle) = Session::start(config, player, callbacks);
        Self {
            session,
            handle,
            commands,
        }
    }

    fn commands(&mut self) -> Vec<PlayerCommand> {
        let mut out = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            out.push(command);
        }
        out
    }

    fn send(&mut self, input: impl Into<Input>) {
        self.handle.send(input).expect("session open");
        self.session.drain();
    }

    fn progress(&mut self, current_ms: i64, total_ms: i64) {
        self.send(NativeEvent::Progress {
            current_ms,
            total_ms,
        });
    }

    async fn advance(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(10);
            tokio::time::advance(Duration::from_millis(step)).await;
            remaining -= step;
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
            self.session.drain();
        }
    }

    fn visibility(&self) -> Visibility {
        self.session.coordinator().visibility().heading()
    }

    fn is_resting(&self, visibility: Visibility) -> bool {
        self.session.coordinator().visibility().is_resting(visibility)
    }
}

#[tokio::test(start_paused = true)]
async fn test_idle_mount_hides_controls() {
    let mut s = Scenario::start(Config::default());
    s.progress(0, 120_000);

    s.advance(2_990).await;
    assert!(s.is_resting(Visibility::Shown));
    assert_eq!(s.session.coordinator().view().opacity, Opacity::SHOWN);

    s.advance(30).await;
    assert_eq!(s.visibility(), Visibility::Hidden);

    s.advance(500).await;
    assert!(s.is_resting(Visibility::Hidden));
    assert!(!s.session.coordinator().view().interaction_armed);
}

#[tokio::test(start_paused = true)]
async fn test_tap_while_hidden_schedules_one_countdown() {
    let mut s = Scenario::start(Config::default());
    s.advance(3_600).await;
    assert!(s.is_resting(Visibility::Hidden));

    // A burst of taps: show, hide, show.
    s.send(Input::SurfaceTapped);
    s.send(Input::SurfaceTapped);
    s.send(Input::SurfaceTapped);
    s.advance(510).await;
    assert!(s.is_resting(Visibility::Shown));
    assert!(s.session.coordinator().is_hide_timer_armed());

    s.advance(2_970).await;
    assert!(s.is_resting(Visibility::Shown));
    s.advance(40).await;
    assert_eq!(s.visibility(), Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn test_guarded_seek_sequence() {
    let mut s = Scenario::start(Config {
        can_seek_unwatch: false,
        ..Config::default()
    });
    s.progress(10_000, 120_000);

    s.send(Input::Host(HostRequest::SeekTo(50_000)));
    assert!(s.commands().is_empty());
    assert_eq!(s.session.coordinator().snapshot().current_ms, 10_000);

    s.send(Input::Host(HostRequest::SeekTo(8_000)));
    assert_eq!(s.commands(), vec![PlayerCommand::SeekTo(8_000)]);
    let watermark = s
        .session
        .coordinator()
        .seek_guard()
        .map(|guard| guard.high_watermark_ms());
    assert_eq!(watermark, Some(10_000));

    s.send(Input::Host(HostRequest::SeekTo(10_000)));
    assert_eq!(s.commands(), vec![PlayerCommand::SeekTo(10_000)]);
}

#[tokio::test(start_paused = true)]
async fn test_finished_while_hidden_parks_auto_hide() {
    let mut s = Scenario::start(Config::default());
    s.send(NativeEvent::Playing);
    s.progress(118_000, 120_000);
    s.advance(3_600).await;
    assert!(s.is_resting(Visibility::Hidden));

    s.send(NativeEvent::Finished);
    assert_eq!(s.visibility(), Visibility::Shown);
    assert!(s.session.coordinator().visibility().is_interaction_armed());
    assert_eq!(s.session.coordinator().snapshot().current_ms, 0);

    s.advance(20_000).await;
    assert!(s.is_resting(Visibility::Shown));

    let view = s.session.coordinator().view();
    assert!(view.show_replay);
    let controls = view.controls.expect("controls enabled");
    assert_eq!(controls.current_label, "00:00");
    assert_eq!(controls.total_label, "02:00");
}

#[tokio::test(start_paused = true)]
async fn test_drag_wins_over_progress_until_next_snapshot() {
    let mut s = Scenario::start(Config::default());
    s.progress(10_000, 120_000);

    s.send(Message::SeekPreview(40_000.0));
    for current in (10_250..=12_000).step_by(250) {
        s.progress(current, 120_000);
        assert_eq!(s.session.coordinator().overlay().displayed_ms(), 40_000);
    }

    s.send(Message::SeekRelease(45_000.0));
    assert_eq!(s.commands(), vec![PlayerCommand::SeekTo(45_000)]);
    // No snap back before the player confirms.
    assert_eq!(s.session.coordinator().overlay().displayed_ms(), 45_000);
    let (current, _) = format_progress(45_000, 120_000);
    assert_eq!(
        s.session.coordinator().view().controls.map(|c| c.current_label),
        Some(current)
    );

    s.progress(45_250, 120_000);
    assert_eq!(s.session.coordinator().overlay().displayed_ms(), 45_250);
}

#[tokio::test(start_paused = true)]
async fn test_source_switch_resumes_position() {
    let config = Config {
        sources: vec![
            VideoSource::new("https://cdn.example/sd.m3u8"),
            VideoSource::new("https://cdn.example/hd.m3u8"),
        ],
        ..Config::default()
    };
    let mut s = Scenario::start(config);
    assert_eq!(s.commands().len(), 1);
    s.progress(33_000, 90_000);

    s.send(Message::OpenSourceMenu);
    let menu = s.session.coordinator().view().source_menu.expect("menu open");
    assert_eq!(menu[0].label, "Smooth");
    assert!(menu[0].selected);
    assert_eq!(menu[1].label, "SD");

    s.send(Input::SelectSource(1));
    assert!(matches!(
        s.commands().as_slice(),
        [PlayerCommand::LoadSource { url, .. }] if url.ends_with("hd.m3u8")
    ));

    s.send(NativeEvent::BufferOk);
    assert_eq!(s.commands(), vec![PlayerCommand::SeekTo(33_000)]);
}

#[tokio::test(start_paused = true)]
async fn test_fullscreen_round_trip_reports_screen_updates() {
    let updates = Arc::new(AtomicUsize::new(0));
    let u = Arc::clone(&updates);
    let callbacks = HostCallbacks::new().screen_update(move || {
        u.fetch_add(1, Ordering::SeqCst);
    });
    let mut s = Scenario::with_callbacks(
        Config {
            video_title: Some("Forklift safety: loading dock procedures".to_string()),
            ..Config::default()
        },
        callbacks,
    );

    s.send(Message::ToggleFullscreen);
    let toolbar = s.session.coordinator().view().toolbar.expect("fullscreen");
    assert_eq!(toolbar.title.as_deref(), Some("Forklift safety: lo..."));

    s.advance(250).await;
    s.send(Input::HardwareBack);
    assert_eq!(
        s.session.coordinator().orientation(),
        ScreenOrientation::Portrait
    );
    assert_eq!(
        s.commands(),
        vec![
            PlayerCommand::SetFullscreen(ScreenOrientation::Fullscreen),
            PlayerCommand::SetFullscreen(ScreenOrientation::Portrait),
        ]
    );

    // The second toggle re-armed the same timer.
    s.advance(490).await;
    assert_eq!(updates.load(Ordering::SeqCst), 0);
    s.advance(20).await;
    assert_eq!(updates.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_is_idempotent_and_final() {
    let mut s = Scenario::start(Config {
        src: Some("clip.mp4".to_string()),
        ..Config::default()
    });
    s.commands();

    s.send(Input::Dispose);
    s.send(Input::Dispose);
    s.session.coordinator_mut().dispose();
    assert_eq!(s.commands(), vec![PlayerCommand::Stop]);

    s.send(Message::TogglePlayback);
    s.progress(1_000, 10_000);
    s.advance(5_000).await;
    assert!(s.commands().is_empty());
    assert_eq!(s.session.coordinator().snapshot().current_ms, 0);
}
