//! Configuration-dependent behavior: listener policy, pending notifications
//! across children replacement, and transition settings.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sortable::animation::ANIMATION_DURATION;
use sortable::{
    ChildRef, HitTest, IndexChange, ItemEvents, LayoutAnimation, PendingPolicy, Point, Rect,
    ReleaseOutcome, ReorderPolicy, Sortable, SortableConfig, reorder,
};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn stacked(config: SortableConfig) -> Sortable<&'static str> {
    let mut list = Sortable::with_config(["a", "b", "c"], config);
    for index in 0..3 {
        list.on_layout(index, Rect::new(0.0, 50.0 * index as f32, 100.0, 50.0));
    }
    list
}

fn listen(list: &Sortable<&'static str>) -> Arc<Mutex<Vec<IndexChange>>> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    list.connect_child_index_changed(move |change| sink.lock().push(*change));
    received
}

fn drag_first_to_last(list: &mut Sortable<&'static str>, now: Instant) -> Option<ReleaseOutcome> {
    list.on_grant(0, Point::new(50.0, 25.0));
    list.on_move(0, Point::new(50.0, 125.0));
    list.release_at(0, Point::new(50.0, 125.0), now)
}

#[test]
fn test_always_policy_reorders_without_listener() {
    setup();
    let mut list = stacked(SortableConfig::default());
    let start = Instant::now();

    let outcome = drag_first_to_last(&mut list, start).unwrap();

    assert_eq!(outcome.change(), Some(IndexChange::new(0, 2)));
    assert_eq!(list.order(), vec![1, 2, 0]);
    assert_eq!(list.pending_notification_count(), 1);
    assert_eq!(list.time_until_next_notification(start), Some(ANIMATION_DURATION));

    // Nobody is connected when it fires; the change is simply dropped.
    list.process_timers_at(start + ANIMATION_DURATION);
    assert_eq!(list.pending_notification_count(), 0);
}

#[test]
fn test_listener_connected_after_release_is_notified() {
    setup();
    let mut list = stacked(SortableConfig::default());
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    list.process_timers_at(start + Duration::from_millis(100));
    let received = listen(&list);

    list.process_timers_at(start + ANIMATION_DURATION);
    assert_eq!(*received.lock(), vec![IndexChange::new(0, 2)]);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_no_listener_warning_even_when_nothing_moves() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut list = stacked(SortableConfig::default());
        list.on_grant(0, Point::new(50.0, 25.0));
        let outcome = list.release_at(0, Point::new(500.0, 500.0), Instant::now());
        assert_eq!(outcome, Some(ReleaseOutcome::Unchanged));
    });

    let text = logs.contents();
    assert_eq!(text.matches("no child_index_changed listener connected").count(), 1);
}

#[test]
fn test_only_if_listener_policy_skips_reorder() {
    setup();
    let config = SortableConfig::default().with_reorder_policy(ReorderPolicy::OnlyIfListener);
    let mut list = stacked(config);
    let start = Instant::now();

    let outcome = drag_first_to_last(&mut list, start).unwrap();

    assert_eq!(outcome, ReleaseOutcome::Suppressed);
    assert_eq!(list.order(), vec![0, 1, 2]);
    assert!(list.shadow_rect().is_none());
    assert_eq!(list.view_at(start).opacity, 1.0);
}

#[test]
fn test_only_if_listener_policy_reorders_with_listener() {
    setup();
    let config = SortableConfig::default().with_reorder_policy(ReorderPolicy::OnlyIfListener);
    let mut list = stacked(config);
    let received = listen(&list);
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    assert_eq!(list.order(), vec![1, 2, 0]);

    list.process_timers_at(start + ANIMATION_DURATION);
    assert_eq!(*received.lock(), vec![IndexChange::new(0, 2)]);
}

#[test]
fn test_scoped_listener_counts_only_while_alive() {
    setup();
    let config = SortableConfig::default().with_reorder_policy(ReorderPolicy::OnlyIfListener);
    let mut list = stacked(config);
    let hits = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    {
        let hits = hits.clone();
        let signal = list.child_index_changed();
        let _guard = signal.connect_scoped(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        assert!(signal.has_connections());
    }

    // The guard is gone, so nobody listens any more.
    assert_eq!(drag_first_to_last(&mut list, start), Some(ReleaseOutcome::Suppressed));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dead_insert_reports_no_change() {
    let list: Vec<ChildRef> = (0..4).map(ChildRef::new).collect();

    // Inserting 2 right after its predecessor, or right before its
    // successor, puts it back where it was.
    for hit in [HitTest::After(ChildRef::new(1)), HitTest::Before(ChildRef::new(3))] {
        let result = reorder(list.clone(), ChildRef::new(2), hit);
        assert!(!result.changed());
        assert_eq!(result.change, None);
        assert_eq!(result.list, list);
    }
}

#[test]
fn test_pending_notification_delivered_after_replace() {
    setup();
    let mut list = stacked(SortableConfig::default());
    let received = listen(&list);
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    list.set_children(["x", "y"]);

    assert_eq!(list.order(), vec![0, 1]);
    assert_eq!(list.pending_notification_count(), 1);
    assert_eq!(list.view_at(start).opacity, 1.0);

    list.process_timers_at(start + ANIMATION_DURATION);
    // Indices refer to the list as it was before the replacement.
    assert_eq!(*received.lock(), vec![IndexChange::new(0, 2)]);
}

#[test]
fn test_pending_notification_discarded_after_replace() {
    setup();
    let config = SortableConfig::default().with_pending_on_replace(PendingPolicy::Discard);
    let mut list = stacked(config);
    let received = listen(&list);
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    list.set_children(["x", "y"]);

    assert_eq!(list.pending_notification_count(), 0);
    assert_eq!(list.time_until_next_notification(start), None);
    assert_eq!(list.process_timers_at(start + Duration::from_secs(1)), 0);
    assert!(received.lock().is_empty());
}

#[test]
fn test_replace_cancels_open_drag() {
    setup();
    let mut list = stacked(SortableConfig::default());
    let received = listen(&list);
    let start = Instant::now();

    list.on_grant(0, Point::new(50.0, 25.0));
    list.set_children(["x", "y", "z"]);

    // The release belongs to the cancelled drag and is ignored.
    assert!(list.release_at(0, Point::new(50.0, 125.0), start).is_none());
    assert_eq!(list.order(), vec![0, 1, 2]);

    // Layouts were forgotten: a fresh grant needs a fresh report.
    list.on_grant(0, Point::new(50.0, 25.0));
    assert!(list.shadow_rect().is_none());
    list.on_layout(0, Rect::new(0.0, 0.0, 100.0, 50.0));
    list.on_grant(0, Point::new(50.0, 25.0));
    assert_eq!(list.shadow_rect(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

    list.process_timers_at(start + Duration::from_secs(1));
    assert!(received.lock().is_empty());
}

#[test]
fn test_configured_duration_sets_notification_delay() {
    setup();
    let config = SortableConfig::from_toml_str("transition_duration_ms = 300").unwrap();
    let mut list = stacked(config);
    let received = listen(&list);
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    assert_eq!(list.time_until_next_notification(start), Some(Duration::from_millis(300)));

    list.process_timers_at(start + ANIMATION_DURATION);
    assert!(received.lock().is_empty());
    assert!(list.view_at(start + ANIMATION_DURATION).opacity < 1.0);

    list.process_timers_at(start + Duration::from_millis(300));
    assert_eq!(received.lock().len(), 1);
}

#[test]
fn test_animation_driver_receives_configured_transition() {
    setup();
    let config = SortableConfig::from_toml_str(
        r#"
        transition_duration_ms = 250
        easing = "ease_out"
        property = "scale_xy"
        "#,
    )
    .unwrap();
    let expected = config.transition;
    let mut list = stacked(config);
    let seen: Arc<Mutex<Vec<LayoutAnimation>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    list.set_animation_driver(move |animation: &LayoutAnimation| sink.lock().push(*animation));

    drag_first_to_last(&mut list, Instant::now());
    assert_eq!(*seen.lock(), vec![expected]);
}

#[test]
fn test_blocked_signal_swallows_notification() {
    setup();
    let mut list = stacked(SortableConfig::default());
    let received = listen(&list);
    let start = Instant::now();

    drag_first_to_last(&mut list, start);
    list.child_index_changed().set_blocked(true);
    list.process_timers_at(start + ANIMATION_DURATION);
    assert!(received.lock().is_empty());
    assert_eq!(list.pending_notification_count(), 0);
}
