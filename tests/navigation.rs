use cardbook::audio::{shared, RecordingSink};
use cardbook::book::{Direction, PageNavigator, DEFAULT_LOCK_DURATION};
use cardbook::input::{InputAction, InputChannel, SwipeGesture, SWIPE_THRESHOLD_PX};
use cardbook::render::{UIRenderer, ViewState};
use cardbook::{Application, CardConfig};
use proptest::prelude::*;
use tokio::time::{advance, Duration, Instant};

/// Renderer that draws nothing; the tests only look at application state.
struct HeadlessRenderer;

impl UIRenderer for HeadlessRenderer {
    fn render(&mut self, _view_state: &ViewState) -> cardbook::Result<()> {
        Ok(())
    }

    fn initialize(&mut self) -> cardbook::Result<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> cardbook::Result<()> {
        Ok(())
    }

    fn get_terminal_size(&self) -> cardbook::Result<(u16, u16)> {
        Ok((80, 24))
    }
}

fn application(config: &CardConfig) -> (Application, RecordingSink) {
    let sink = RecordingSink::new();
    let recorder = sink.clone();
    let app = Application::new(config, Box::new(HeadlessRenderer), shared(sink))
        .expect("application builds");
    (app, recorder)
}

fn seeded_config() -> CardConfig {
    let mut config = CardConfig::default();
    config.effects.seed = Some(42);
    config
}

proptest! {
    #[test]
    fn current_page_stays_in_bounds(
        total in 1usize..8,
        steps in prop::collection::vec((any::<bool>(), 0u64..1_600), 0..64),
    ) {
        let mut nav = PageNavigator::new(total, DEFAULT_LOCK_DURATION);
        let mut now = Instant::now();
        for (forward, gap_ms) in steps {
            now += Duration::from_millis(gap_ms);
            let before = nav.current_page();
            let turn = if forward { nav.next(now) } else { nav.previous(now) };

            prop_assert!(nav.current_page() >= 1);
            prop_assert!(nav.current_page() <= total);
            match turn {
                Some(turn) => {
                    prop_assert_eq!(turn.from, before);
                    prop_assert_eq!(turn.to, nav.current_page());
                    prop_assert_eq!(before.abs_diff(turn.to), 1);
                }
                None => prop_assert_eq!(nav.current_page(), before),
            }
        }
    }
}

#[test]
fn swipe_threshold_boundaries() {
    let short = SwipeGesture::new(200.0, 151.0);
    assert_eq!(short.distance(), -49.0);
    assert_eq!(short.direction(SWIPE_THRESHOLD_PX), None);

    let left = SwipeGesture::new(200.0, 149.0);
    assert_eq!(left.direction(SWIPE_THRESHOLD_PX), Some(Direction::Next));

    let right = SwipeGesture::new(0.0, 51.0);
    assert_eq!(right.direction(SWIPE_THRESHOLD_PX), Some(Direction::Previous));
}

#[tokio::test(start_paused = true)]
async fn end_to_end_page_turns() {
    let (mut app, recorder) = application(&seeded_config());
    let next = InputAction::Navigate {
        direction: Direction::Next,
        channel: InputChannel::Keyboard,
    };

    assert_eq!(app.current_page(), 1);

    app.handle_action(next.clone(), Instant::now()).await.unwrap();
    assert_eq!(app.current_page(), 2);
    assert!(app.navigator().is_animating(Instant::now()));

    app.handle_action(next.clone(), Instant::now()).await.unwrap();
    assert_eq!(app.current_page(), 2);

    advance(DEFAULT_LOCK_DURATION - Duration::from_millis(1)).await;
    assert!(app.navigator().is_animating(Instant::now()));

    advance(Duration::from_millis(1)).await;
    assert!(!app.navigator().is_animating(Instant::now()));

    app.handle_action(next, Instant::now()).await.unwrap();
    assert_eq!(app.current_page(), 3);
    assert_eq!(app.view_state().indicator, "3 / 4");

    let flips = recorder
        .log()
        .lock()
        .iter()
        .filter(|sound| sound.is_page_flip())
        .count();
    assert_eq!(flips, 2);
}

#[tokio::test(start_paused = true)]
async fn swipe_and_keys_share_one_lock() {
    let (mut app, _recorder) = application(&seeded_config());

    app.handle_action(InputAction::Swipe(SwipeGesture::new(300.0, 200.0)), Instant::now())
        .await
        .unwrap();
    assert_eq!(app.current_page(), 2);

    app.handle_action(
        InputAction::Navigate {
            direction: Direction::Previous,
            channel: InputChannel::Keyboard,
        },
        Instant::now(),
    )
    .await
    .unwrap();
    assert_eq!(app.current_page(), 2);

    advance(DEFAULT_LOCK_DURATION).await;
    app.handle_action(
        InputAction::Navigate {
            direction: Direction::Previous,
            channel: InputChannel::Keyboard,
        },
        Instant::now(),
    )
    .await
    .unwrap();
    assert_eq!(app.current_page(), 1);

    app.handle_action(InputAction::Swipe(SwipeGesture::new(0.0, 300.0)), Instant::now())
        .await
        .unwrap();
    assert_eq!(app.current_page(), 1);
}

#[cfg(feature = "config")]
#[tokio::test(start_paused = true)]
async fn custom_pages_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.toml");
    std::fs::write(
        &path,
        r#"
theme = "monochrome"

[navigation]
lock_ms = 200

[effects]
seed = 1
light_count = 5

[[pages]]
title = "Hello"
paragraphs = ["one"]

[[pages]]
title = "Goodbye"
signature = "Me"
"#,
    )
    .unwrap();

    let config = CardConfig::load(Some(&path)).unwrap();
    let (mut app, _recorder) = application(&config);
    assert_eq!(app.view_state().indicator, "1 / 2");
    assert_eq!(app.navigator().lock_duration(), Duration::from_millis(200));

    let next = InputAction::Navigate {
        direction: Direction::Next,
        channel: InputChannel::Keyboard,
    };
    app.handle_action(next.clone(), Instant::now()).await.unwrap();
    assert_eq!(app.view_state().page.title, "Goodbye");
    assert!(app.view_state().next_disabled);

    advance(Duration::from_millis(200)).await;
    app.handle_action(next, Instant::now()).await.unwrap();
    assert_eq!(app.current_page(), 2);

    app.refresh(Instant::now());
    assert_eq!(app.view_state().lights.len(), 5);
}
