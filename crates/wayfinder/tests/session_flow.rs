//! End-to-end: a card battle driven purely through `Session::handle`.
//!
//! The "host" is a `Rc<RefCell<Battle>>` that item actions mutate and item
//! sources read, the way a real game bridge would.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tracing::Level;
use wayfinder::{
    ActivationError, ActivationOutcome, BackOutcome, CommandOutcome, FocusContext, FocusItem,
    FocusableItem, NarrationConfig, NavCommand, Session, StaticHelpContext,
};
use wayfinder_core::testing::{RecordingSink, Utterance};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

#[derive(Debug, Default)]
struct Battle {
    hand: Vec<&'static str>,
    mana: u32,
    targeting: Option<&'static str>,
    played: Vec<(&'static str, &'static str)>,
    left_battle: bool,
}

type Shared = Rc<RefCell<Battle>>;

fn hand_items(battle: &Shared) -> Vec<Box<dyn FocusableItem>> {
    let cards = battle.borrow().hand.clone();
    cards
        .into_iter()
        .map(|card| {
            let state = Rc::clone(battle);
            FocusItem::new(card, format!("{card}, costs 1"))
                .with_label(card)
                .on_activate(move || {
                    let mut b = state.borrow_mut();
                    if b.mana == 0 {
                        return Err(ActivationError::Unavailable("no mana".into()));
                    }
                    b.targeting = Some(card);
                    Ok(())
                })
                .boxed()
        })
        .collect()
}

fn hand_context(battle: &Shared) -> FocusContext {
    let source = Rc::clone(battle);
    let back = Rc::clone(battle);
    FocusContext::grid("Hand", 3)
        .with_wrap(false)
        .with_source(move || hand_items(&source))
        .with_back_handler(move || back.borrow_mut().left_battle = true)
}

fn target_context(battle: &Shared) -> FocusContext {
    let targets = ["Goblin", "Orc"];
    let items = targets
        .iter()
        .map(|target| {
            let state = Rc::clone(battle);
            let target = *target;
            FocusItem::new(target, target)
                .on_activate(move || {
                    let mut b = state.borrow_mut();
                    let card = b.targeting.take().ok_or_else(|| {
                        ActivationError::Failed("no card selected".into())
                    })?;
                    b.hand.retain(|c| *c != card);
                    b.mana -= 1;
                    b.played.push((card, target));
                    Ok(())
                })
                .boxed()
        })
        .collect();
    FocusContext::list("Choose target").with_items(items)
}

fn session_with_help(battle: &Shared) -> (Session, Rc<RecordingSink>) {
    let sink = RecordingSink::new();
    let mut session = Session::with_sink(
        sink.clone(),
        NarrationConfig::new().with_fallback_help("Nothing to do here."),
    );

    let in_battle = Rc::clone(battle);
    let targeting = Rc::clone(battle);
    session.help_mut().register_contexts(vec![
        StaticHelpContext::new("battle", "Battle", 50)
            .with_text("Arrows pick a card. Enter plays it.")
            .active_when(move || !in_battle.borrow().left_battle)
            .boxed(),
        StaticHelpContext::new("targeting", "Targeting", 100)
            .with_text("Up and down pick a target. Enter confirms.")
            .active_when(move || targeting.borrow().targeting.is_some())
            .boxed(),
    ]);
    (session, sink)
}

#[test]
fn play_a_card_end_to_end() {
    init_tracing();
    let battle: Shared = Rc::new(RefCell::new(Battle {
        hand: vec!["Strike", "Defend", "Bash", "Zap"],
        mana: 2,
        ..Battle::default()
    }));
    let (mut session, sink) = session_with_help(&battle);

    // Enter the hand: 4 cards on a 3-wide grid.
    session.focus_mut().set_context(hand_context(&battle), true);
    assert_eq!(
        sink.take(),
        vec![
            Utterance::interrupting("Hand"),
            Utterance::queued("Strike, costs 1, 1 of 4"),
        ]
    );

    // Right twice, then right again clamps at column 2.
    assert_eq!(session.handle(NavCommand::Right), CommandOutcome::Moved(true));
    assert_eq!(session.handle(NavCommand::Right), CommandOutcome::Moved(true));
    assert_eq!(session.handle(NavCommand::Right), CommandOutcome::Moved(false));
    assert_eq!(session.focus().current_focus(), Some("Bash"));

    // Row 1 has only column 0, so down from Bash is refused.
    assert_eq!(session.handle(NavCommand::Down), CommandOutcome::Moved(false));
    sink.take();

    // Battle help while no card is selected.
    assert_eq!(
        session.handle(NavCommand::Help),
        CommandOutcome::Help(Some("battle".into()))
    );
    assert_eq!(
        sink.take(),
        vec![Utterance::interrupting(
            "Battle help. Arrows pick a card. Enter plays it."
        )]
    );

    // Select Bash, drill into targeting.
    assert_eq!(
        session.handle(NavCommand::Activate),
        CommandOutcome::Activation(ActivationOutcome::Activated)
    );
    session.focus_mut().set_context(target_context(&battle), true);
    assert_eq!(session.focus().stack_depth(), 1);

    // Targeting outranks battle while both are active.
    assert_eq!(
        session.handle(NavCommand::Help),
        CommandOutcome::Help(Some("targeting".into()))
    );

    session.handle(NavCommand::Down);
    assert_eq!(
        session.handle(NavCommand::Activate),
        CommandOutcome::Activation(ActivationOutcome::Activated)
    );
    assert_eq!(battle.borrow().played, vec![("Bash", "Orc")]);

    // Back to the hand: Bash is gone, so the remembered focus is stale.
    sink.take();
    assert_eq!(
        session.handle(NavCommand::Back),
        CommandOutcome::Back(BackOutcome::Popped)
    );
    assert_eq!(session.focus().current_focus(), Some("Strike"));
    assert_eq!(
        sink.texts(),
        vec!["Hand".to_string(), "Strike, costs 1, 1 of 3".to_string()]
    );

    // Summary reads labels only.
    sink.take();
    assert_eq!(session.handle(NavCommand::Summary), CommandOutcome::Spoken);
    assert_eq!(
        sink.texts(),
        vec!["Hand, 3 items: 1. Strike, 2. Defend, 3. Zap".to_string()]
    );
}

#[test]
fn failed_activation_keeps_session_alive() {
    init_tracing();
    let battle: Shared = Rc::new(RefCell::new(Battle {
        hand: vec!["Strike"],
        mana: 0,
        ..Battle::default()
    }));
    let (mut session, sink) = session_with_help(&battle);
    session.focus_mut().set_context(hand_context(&battle), true);
    sink.take();

    assert_eq!(
        session.handle(NavCommand::Activate),
        CommandOutcome::Activation(ActivationOutcome::Failed)
    );
    assert!(sink.is_empty());
    assert_eq!(session.handle(NavCommand::WhereAmI), CommandOutcome::Spoken);
    assert_eq!(sink.texts(), vec!["Hand. Strike, costs 1".to_string()]);
}

#[test]
fn back_at_root_leaves_battle() {
    let battle: Shared = Rc::new(RefCell::new(Battle {
        hand: vec!["Strike", "Zap"],
        mana: 1,
        ..Battle::default()
    }));
    let (mut session, sink) = session_with_help(&battle);
    session.focus_mut().set_context(hand_context(&battle), true);

    assert_eq!(
        session.handle(NavCommand::Back),
        CommandOutcome::Back(BackOutcome::Delegated)
    );
    assert!(battle.borrow().left_battle);

    // Neither help context is active any more.
    sink.take();
    assert_eq!(session.handle(NavCommand::Help), CommandOutcome::Help(None));
    assert_eq!(sink.texts(), vec!["Nothing to do here.".to_string()]);
}

#[test]
fn refresh_picks_up_new_cards() {
    let battle: Shared = Rc::new(RefCell::new(Battle {
        hand: vec!["Strike"],
        mana: 1,
        ..Battle::default()
    }));
    let (mut session, _sink) = session_with_help(&battle);
    session.focus_mut().set_context(hand_context(&battle), true);
    assert_eq!(session.handle(NavCommand::Right), CommandOutcome::Moved(false));

    battle.borrow_mut().hand.push("Draw");
    assert_eq!(session.handle(NavCommand::Refresh), CommandOutcome::Refreshed);
    assert_eq!(session.handle(NavCommand::Right), CommandOutcome::Moved(true));
    assert_eq!(session.focus().current_focus(), Some("Draw"));
}
