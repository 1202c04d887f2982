// crates/relay-core/tests/pairing_scenarios.rs
use relay_core::{
    ClientEvent, Destination, Matchmaker, Mode, Outbound, ParticipantState, RelayEngine,
    ServerEvent,
};

fn paired_event_for<'a>(outputs: &'a [Outbound], id: &str) -> Option<&'a ServerEvent> {
    outputs.iter().find_map(|o| match (&o.to, &o.event) {
        (Destination::One(dest), ev @ ServerEvent::Paired { .. }) if dest == id => Some(ev),
        _ => None,
    })
}

/// Symmetry and pool/paired exclusivity must hold after every pass.
fn assert_invariants(mm: &Matchmaker, ids: &[&str]) {
    for id in ids {
        match mm.state_of(id) {
            ParticipantState::Paired { with } => {
                assert_ne!(
                    &with, id,
                    "{} must never be paired with itself",
                    id
                );
                assert_eq!(
                    mm.partner_of(&with).map(String::as_str),
                    Some(*id),
                    "pairing of {} and {} must be symmetric",
                    id,
                    with
                );
                assert!(
                    !mm.pool().contains(&id.to_string()),
                    "{} is paired and must not sit in the pool",
                    id
                );
            }
            ParticipantState::Available => {
                assert!(
                    mm.pool().contains(&id.to_string()),
                    "{} is available and must sit in the pool",
                    id
                );
            }
            ParticipantState::Unregistered => {
                assert!(!mm.pool().contains(&id.to_string()));
            }
        }
    }
}

#[test]
fn even_pool_drains_in_arrival_order() {
    let mut mm = Matchmaker::new();

    assert!(mm.join_pool("a").is_empty(), "a alone cannot pair");

    let outputs = mm.join_pool("b");
    assert_eq!(
        paired_event_for(&outputs, "a"),
        Some(&ServerEvent::Paired {
            partner: "b".to_string()
        })
    );
    assert_eq!(
        paired_event_for(&outputs, "b"),
        Some(&ServerEvent::Paired {
            partner: "a".to_string()
        })
    );

    assert!(mm.join_pool("c").is_empty());
    let outputs = mm.join_pool("d");
    assert_eq!(
        paired_event_for(&outputs, "c"),
        Some(&ServerEvent::Paired {
            partner: "d".to_string()
        })
    );

    assert!(mm.pool().is_empty(), "even pool must drain completely");
    assert_invariants(&mm, &["a", "b", "c", "d"]);
}

#[test]
fn odd_pool_leaves_exactly_one_unpaired() {
    let mut mm = Matchmaker::new();
    for id in ["a", "b", "c", "d", "e"] {
        mm.join_pool(id);
    }

    assert_eq!(mm.pool(), &["e".to_string()]);
    assert_eq!(mm.state_of("e"), ParticipantState::Available);
    assert_invariants(&mm, &["a", "b", "c", "d", "e"]);
}

#[test]
fn join_is_idempotent_while_pooled_or_paired() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");
    assert!(mm.join_pool("a").is_empty());
    assert_eq!(mm.pool(), &["a".to_string()], "no duplicate pool entry");

    mm.join_pool("b");
    assert!(
        mm.join_pool("a").is_empty(),
        "a is paired; joining again must not re-pool it"
    );
    assert!(mm.pool().is_empty());
    assert_eq!(mm.partner_of("a").map(String::as_str), Some("b"));
}

#[test]
fn skip_requeues_leaver_first_and_notifies_partner() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");
    mm.join_pool("b");

    // Nobody else around: a and b land back together immediately.
    let outputs = mm.skip("a");
    assert_eq!(
        outputs[0],
        Outbound::one("b", ServerEvent::Skipped),
        "the skipped partner must be told first"
    );
    assert_eq!(mm.partner_of("a").map(String::as_str), Some("b"));
    assert_invariants(&mm, &["a", "b"]);
}

#[test]
fn skip_prefers_waiting_candidate_over_former_partner() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");
    mm.join_pool("b");
    mm.join_pool("c"); // c waits alone

    let outputs = mm.skip("a");

    // Pool order after the skip is [c, a, b]: c pairs with the leaver.
    assert_eq!(mm.partner_of("c").map(String::as_str), Some("a"));
    assert_eq!(mm.state_of("b"), ParticipantState::Available);
    assert_eq!(mm.pool(), &["b".to_string()]);

    assert!(outputs.contains(&Outbound::one("b", ServerEvent::Skipped)));
    assert!(paired_event_for(&outputs, "c").is_some());
    assert_invariants(&mm, &["a", "b", "c"]);
}

#[test]
fn skip_without_partner_is_a_no_op() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");

    assert!(mm.skip("a").is_empty());
    assert_eq!(mm.pool(), &["a".to_string()]);
    assert!(mm.skip("stranger").is_empty());
}

#[test]
fn disconnect_requeues_partner_and_removes_leaver_for_good() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");
    mm.join_pool("b");

    let outputs = mm.disconnect("a");
    assert_eq!(outputs, vec![Outbound::one("b", ServerEvent::PartnerLeft)]);

    assert_eq!(mm.state_of("a"), ParticipantState::Unregistered);
    assert_eq!(mm.state_of("b"), ParticipantState::Available);
    assert_eq!(mm.pool(), &["b".to_string()]);

    // A newcomer pairs with the abandoned partner, never the leaver.
    let outputs = mm.join_pool("c");
    assert_eq!(mm.partner_of("b").map(String::as_str), Some("c"));
    assert!(paired_event_for(&outputs, "a").is_none());
}

#[test]
fn disconnect_while_waiting_just_leaves_the_pool() {
    let mut mm = Matchmaker::new();
    mm.join_pool("a");

    assert!(mm.disconnect("a").is_empty());
    assert!(mm.pool().is_empty());
    assert_eq!(mm.state_of("a"), ParticipantState::Unregistered);
}

#[test]
fn engine_relays_text_only_to_the_current_partner() {
    let mut engine = RelayEngine::new(Mode::Paired);
    engine.register("a");
    engine.register("b");

    let outputs = engine.process(
        "a",
        ClientEvent::Message {
            text: "hello".to_string(),
        },
    );
    assert_eq!(
        outputs,
        vec![Outbound::one("b", ServerEvent::message("a", "hello"))]
    );
}

#[test]
fn engine_drops_text_from_unpaired_sender() {
    let mut engine = RelayEngine::new(Mode::Paired);
    engine.register("a");

    let outputs = engine.process(
        "a",
        ClientEvent::Message {
            text: "anyone there?".to_string(),
        },
    );
    assert!(outputs.is_empty());
}

#[test]
fn engine_ignores_direct_addressing_events_in_paired_mode() {
    let mut engine = RelayEngine::new(Mode::Paired);
    engine.register("a");
    engine.register("b");

    let outputs = engine.process(
        "a",
        ClientEvent::DirectMessage {
            recipient: "b".to_string(),
            message: "psst".to_string(),
        },
    );
    assert!(outputs.is_empty());
    assert!(engine.history("a", "b").is_empty());

    assert!(engine.process("a", ClientEvent::GetUsers).is_empty());
}

#[test]
fn engine_register_sends_no_acknowledgement_in_paired_mode() {
    let mut engine = RelayEngine::new(Mode::Paired);

    let outputs = engine.register("a");
    assert!(
        outputs.is_empty(),
        "the first frame a participant sees is `paired`"
    );
    assert_eq!(engine.pool(), &["a".to_string()]);
}
