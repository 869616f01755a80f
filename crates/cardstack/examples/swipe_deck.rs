//! Headless walk-through of a swipe deck.
//!
//! Drives a card stack the way a host toolkit would — pan phases in, poses
//! and fly-aways out — and prints what an observer sees.
//!
//! Run with: cargo run -p cardstack --example swipe_deck

use std::sync::Arc;
use std::time::Duration;

use cardstack::card::Card;
use cardstack::events::{PanEvent, SwipeDirection};
use cardstack::geometry::{Point, Rect};
use cardstack::source::StaticDeck;
use cardstack::stack::CardStackView;

fn print_window(stack: &CardStackView) {
    for (depth, card) in stack.cards().enumerate() {
        let pose = card.pose();
        println!(
            "  depth {depth}: index {:?} {:?} scale {:.2} offset-y {:.1} alpha {:.2}",
            card.index(),
            card.content().as_text().unwrap_or("-"),
            pose.scale_x,
            pose.translation.y,
            pose.alpha,
        );
    }
}

fn settle(stack: &mut CardStackView) {
    // A real host keeps scheduling frames while tick() returns true; with
    // 60 fps worth of sleeps this loop is the whole animation driver.
    while stack.tick() {
        std::thread::sleep(Duration::from_millis(16));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardstack=debug".into()),
        )
        .init();

    let deck = StaticDeck::from_texts(["amber", "basalt", "cedar", "dune", "ember"]);
    let mut stack = CardStackView::new(Rect::new(0.0, 0.0, 400.0, 600.0))
        .with_data_source(Arc::new(deck));
    stack.register("card", Card::new);

    stack.removed.connect(|(_, index)| {
        println!("* removed card at index {index}");
    });
    stack.removed_last.connect(|_| {
        println!("* the deck is empty");
    });
    stack.selected.connect(|index| {
        println!("* selected card at index {index}");
    });

    stack.reload(false)?;
    println!("after reload:");
    print_window(&stack);

    // Tap the front card.
    stack.handle_tap();

    // Drag the front card most of the way, then release below the
    // threshold: it springs back.
    println!("\ndrag released below the threshold:");
    stack.handle_pan(PanEvent::began())?;
    stack.handle_pan(PanEvent::changed(Point::new(60.0, 12.0)))?;
    stack.handle_pan(PanEvent::ended())?;
    settle(&mut stack);
    print_window(&stack);

    // Now swipe it away for real.
    println!("\nswipe past the threshold:");
    stack.handle_pan(PanEvent::began())?;
    stack.handle_pan(PanEvent::changed(Point::new(140.0, 20.0)))?;
    stack.handle_pan(PanEvent::ended())?;
    if let Some(fly_away) = stack.fly_aways().first() {
        println!(
            "  fly-away heading {:?} toward x = {:.0}",
            fly_away.direction(),
            fly_away.target_center_x()
        );
    }
    settle(&mut stack);
    print_window(&stack);

    // Drain the rest programmatically.
    println!("\ndraining the deck:");
    while !stack.is_empty() {
        stack.remove_top(SwipeDirection::Left)?;
        settle(&mut stack);
    }

    Ok(())
}
