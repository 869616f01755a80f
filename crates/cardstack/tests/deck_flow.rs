//! End-to-end flows through the card stack: gesture-driven removal,
//! recycling, replenishment, and observer signals.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use cardstack::card::Card;
use cardstack::events::{PanEvent, SwipeDirection};
use cardstack::geometry::{Point, Rect};
use cardstack::source::StaticDeck;
use cardstack::stack::CardStackView;

const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 600.0);
// StackConfig::for_surface derives the removal threshold from the surface
// width: 400 / 4.
const THRESHOLD: f32 = 100.0;

fn stack_of(count: usize) -> CardStackView {
    let deck = StaticDeck::from_texts((0..count).map(|i| format!("card {i}")));
    let mut stack = CardStackView::new(BOUNDS).with_data_source(Arc::new(deck));
    stack.register("card", Card::new);
    stack.set_animation_duration(Duration::ZERO);
    stack.set_restore_duration(Duration::ZERO);
    stack.reload(false).unwrap();
    stack
}

fn swipe(stack: &mut CardStackView, dx: f32) {
    stack.handle_pan(PanEvent::began()).unwrap();
    stack.handle_pan(PanEvent::changed(Point::new(dx, 0.0))).unwrap();
    stack.handle_pan(PanEvent::ended()).unwrap();
}

#[test]
fn swipe_past_threshold_removes_front_card() {
    let mut stack = stack_of(5);
    let removals = Arc::new(Mutex::new(Vec::new()));

    let captured = removals.clone();
    stack.removed.connect(move |(_, index)| {
        captured.lock().push(*index);
    });

    assert_eq!(stack.move_count(), 0);
    swipe(&mut stack, THRESHOLD + 1.0);

    assert_eq!(*removals.lock(), vec![0]);
    assert_eq!(stack.move_count(), 1);
    // The window replenished from the data source.
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.current_top_index(), Some(1));
    let indices: Vec<_> = stack.cards().map(|card| card.index()).collect();
    assert_eq!(indices, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn swipe_exactly_at_threshold_restores() {
    let mut stack = stack_of(3);
    let removals = Arc::new(Mutex::new(0usize));

    let captured = removals.clone();
    stack.removed.connect(move |_| {
        *captured.lock() += 1;
    });

    swipe(&mut stack, THRESHOLD);

    assert_eq!(*removals.lock(), 0);
    assert_eq!(stack.move_count(), 0);
    assert_eq!(stack.current_top_index(), Some(0));

    // The zero-duration restore settles on the first tick.
    stack.tick();
    let front = stack.cards().next().unwrap();
    assert!(front.pose().is_identity());
}

#[test]
fn leftward_swipe_removes_left() {
    let mut stack = stack_of(3);
    swipe(&mut stack, -(THRESHOLD + 20.0));

    assert_eq!(stack.move_count(), 1);
    let fly_away = &stack.fly_aways()[0];
    assert_eq!(fly_away.direction(), SwipeDirection::Left);
    assert!(fly_away.target_center_x() < 0.0);
}

#[test]
fn draining_the_deck_emits_removed_last_once() {
    const DECK_SIZE: usize = 4;
    let mut stack = stack_of(DECK_SIZE);

    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = events.clone();
    stack.removed.connect(move |(_, index)| {
        captured.lock().push(format!("removed {index}"));
    });
    let captured = events.clone();
    stack.removed_last.connect(move |_| {
        captured.lock().push("removed last".to_string());
    });

    for _ in 0..DECK_SIZE {
        swipe(&mut stack, THRESHOLD * 2.0);
    }

    assert!(stack.is_empty());
    // move_count reset as the window emptied for good.
    assert_eq!(stack.move_count(), 0);
    assert_eq!(
        *events.lock(),
        vec![
            "removed 0",
            "removed 1",
            "removed 2",
            "removed 3",
            "removed last",
        ]
    );

    // Further gestures and removals are harmless no-ops.
    swipe(&mut stack, THRESHOLD * 2.0);
    stack.remove_top(SwipeDirection::Right).unwrap();
    stack.handle_tap();
    assert_eq!(events.lock().len(), 5);
}

#[test]
fn removed_cards_are_recycled_into_replenished_slots() {
    let mut stack = stack_of(10);
    let front_id = stack.cards().next().unwrap().id();

    swipe(&mut stack, THRESHOLD * 3.0);

    // The instance that left the front came straight back as the new deepest
    // layer, reassigned to the next logical index.
    let back = stack.cards().last().unwrap();
    assert_eq!(back.id(), front_id);
    assert_eq!(back.index(), Some(3));
    assert!(back.content().as_text().is_some());
}

#[test]
fn moved_signal_tracks_the_drag() {
    let mut stack = stack_of(3);
    let points = Arc::new(Mutex::new(Vec::new()));

    let captured = points.clone();
    stack.moved.connect(move |(_, point)| {
        captured.lock().push(*point);
    });

    stack.handle_pan(PanEvent::began()).unwrap();
    stack
        .handle_pan(PanEvent::changed(Point::new(20.0, 5.0)))
        .unwrap();
    stack
        .handle_pan(PanEvent::changed(Point::new(15.0, -2.0)))
        .unwrap();
    stack.handle_pan(PanEvent::cancelled()).unwrap();

    // Deltas accumulate across the gesture; each Changed phase reports the
    // running translation.
    assert_eq!(
        *points.lock(),
        vec![Point::new(20.0, 5.0), Point::new(35.0, 3.0)]
    );
    assert_eq!(stack.move_count(), 0);
}

#[test]
fn tap_selects_the_front_index() {
    let mut stack = stack_of(4);
    let selections = Arc::new(Mutex::new(Vec::new()));

    let captured = selections.clone();
    stack.selected.connect(move |index| {
        captured.lock().push(*index);
    });

    stack.handle_tap();
    swipe(&mut stack, THRESHOLD * 2.0);
    stack.handle_tap();

    assert_eq!(*selections.lock(), vec![0, 1]);
}

#[test]
fn finished_displaying_reports_the_back_card() {
    let mut stack = stack_of(5);
    let displayed = Arc::new(Mutex::new(Vec::new()));

    let captured = displayed.clone();
    stack.finished_displaying.connect(move |(_, index)| {
        captured.lock().push(*index);
    });

    stack.update_layout(false);
    assert_eq!(*displayed.lock(), vec![2]);

    // Replenishment advances the deepest visible index.
    swipe(&mut stack, THRESHOLD * 2.0);
    assert_eq!(*displayed.lock(), vec![2, 3]);
}

#[test]
fn fly_away_outlives_the_removal_notification() {
    let mut stack = stack_of(3);
    let order = Arc::new(Mutex::new(Vec::new()));

    let captured = order.clone();
    stack.removed.connect(move |_| {
        captured.lock().push("removed");
    });

    swipe(&mut stack, THRESHOLD * 2.0);

    // did-remove has already fired while the snapshot is still in flight.
    order.lock().push("fly-away still active");
    assert_eq!(stack.fly_aways().len(), 1);

    stack.tick();
    assert!(stack.fly_aways().is_empty());
    assert_eq!(*order.lock(), vec!["removed", "fly-away still active"]);
}

#[test]
fn grabbing_a_restoring_card_starts_a_fresh_drag() {
    let mut stack = stack_of(3);
    stack.set_restore_duration(Duration::from_secs(60));

    // Release below the threshold: the card restores slowly.
    swipe(&mut stack, THRESHOLD / 2.0);
    assert_eq!(stack.current_top_index(), Some(0));

    // Grab it mid-restore and drag past the threshold from rest.
    swipe(&mut stack, THRESHOLD + 1.0);
    assert_eq!(stack.move_count(), 1);
    assert_eq!(stack.current_top_index(), Some(1));
}

#[test]
fn single_visible_card_deck() {
    let deck = StaticDeck::from_texts(["only", "second"]);
    let mut stack = CardStackView::new(BOUNDS).with_data_source(Arc::new(deck));
    stack.register("card", Card::new);
    let config = stack.config().clone().with_visible_count(1);
    stack.configure(config);
    stack.set_animation_duration(Duration::ZERO);
    stack.set_restore_duration(Duration::ZERO);
    stack.reload(false).unwrap();

    assert_eq!(stack.len(), 1);
    let front = stack.cards().next().unwrap();
    assert!(front.pose().is_identity());

    // With a single visible layer the window empties on the first removal,
    // which ends the deck: replenishment only happens while cards remain
    // visible behind the front one.
    swipe(&mut stack, THRESHOLD * 2.0);
    assert!(stack.is_empty());
    assert_eq!(stack.move_count(), 0);
}

#[test]
fn reload_resets_move_count_and_pool() {
    let mut stack = stack_of(6);
    swipe(&mut stack, THRESHOLD * 2.0);
    swipe(&mut stack, THRESHOLD * 2.0);
    assert_eq!(stack.move_count(), 2);

    stack.reload(false).unwrap();
    assert_eq!(stack.move_count(), 0);
    assert_eq!(stack.current_top_index(), Some(0));
    assert_eq!(stack.len(), 3);
    assert!(stack.fly_aways().is_empty());
}

#[test]
fn mixed_reuse_identifiers_pool_separately() {
    struct AlternatingDeck {
        count: usize,
    }

    impl cardstack::source::CardDataSource for AlternatingDeck {
        fn count(&self) -> usize {
            self.count
        }

        fn content(&self, index: usize) -> cardstack::content::CardContent {
            cardstack::content::CardContent::Text(format!("item {index}"))
        }

        fn reuse_identifier(&self, index: usize) -> String {
            if index % 2 == 0 { "even" } else { "odd" }.to_string()
        }
    }

    let mut stack =
        CardStackView::new(BOUNDS).with_data_source(Arc::new(AlternatingDeck { count: 8 }));
    stack.register("even", Card::new);
    stack.register("odd", Card::new);
    stack.set_animation_duration(Duration::ZERO);
    stack.set_restore_duration(Duration::ZERO);
    stack.reload(false).unwrap();

    let identifiers: Vec<_> = stack
        .cards()
        .map(|card| card.identifier().to_string())
        .collect();
    assert_eq!(identifiers, vec!["even", "odd", "even"]);

    // Removing an "even" card must hand its instance back to "even" slots
    // only: the replenished index 3 is "odd", so it gets a fresh instance.
    let front_id = stack.cards().next().unwrap().id();
    swipe(&mut stack, THRESHOLD * 2.0);
    let back = stack.cards().last().unwrap();
    assert_eq!(back.identifier(), "odd");
    assert_ne!(back.id(), front_id);
}
