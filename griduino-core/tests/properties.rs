//! Property-based tests for the state machine engine and the button
//! gesture classifier.

use griduino_core::button::{ButtonClassifier, ButtonEvent, ButtonState, Gesture};
use griduino_core::config::ButtonTiming;
use griduino_core::sm::{AutoTarget, Marker, Outcome, SmResult, StateFns, StateId, StateMachine};
use proptest::prelude::*;

const STATES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Enter(StateId),
    Exit(StateId),
    Process(StateId),
}

fn log(sm: &mut StateMachine<Vec<Call>>, call: Call) {
    sm.user_data_mut().push(call);
}

fn on_enter(sm: &mut StateMachine<Vec<Call>>, _marker: Marker) -> SmResult {
    let state = sm.state();
    log(sm, Call::Enter(state));
    Ok(Outcome::Ok)
}

fn on_exit(sm: &mut StateMachine<Vec<Call>>, _marker: Marker) -> SmResult {
    let state = sm.state();
    log(sm, Call::Exit(state));
    Ok(Outcome::Ok)
}

/// The event is the state to request; anything out of range is rejected
fn on_process(sm: &mut StateMachine<Vec<Call>>, target: StateId) -> SmResult {
    let state = sm.state();
    log(sm, Call::Process(state));
    let _ = sm.request_transition(target);
    Ok(Outcome::NoStateChange)
}

const ENTRY: StateFns<StateId, Vec<Call>> = StateFns::new(on_enter, on_process, on_exit);
const TABLE: [StateFns<StateId, Vec<Call>>; STATES as usize] = [ENTRY; STATES as usize];

#[derive(Debug, Clone)]
enum Op {
    Process(StateId),
    Request(StateId),
    Previous,
    Auto(AutoTarget),
    Pause,
    Resume,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..STATES + 3).prop_map(Op::Process),
        1 => (0..STATES + 3).prop_map(Op::Request),
        1 => Just(Op::Previous),
        1 => prop_oneof![
            (0..STATES + 3).prop_map(AutoTarget::State),
            Just(AutoTarget::Ignore),
            Just(AutoTarget::Restart),
        ]
        .prop_map(Op::Auto),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
    ]
}

fn arbitrary_event() -> impl Strategy<Value = ButtonEvent> {
    prop_oneof![
        3 => Just(ButtonEvent::Tick),
        1 => Just(ButtonEvent::Down),
        1 => Just(ButtonEvent::Up),
    ]
}

fn feed(c: &mut ButtonClassifier, event: ButtonEvent, n: u32) {
    for _ in 0..n {
        c.process(event).unwrap();
    }
}

proptest! {
    #[test]
    fn state_stays_in_range(ops in prop::collection::vec(arbitrary_op(), 0..64)) {
        let mut sm = StateMachine::new(Vec::new());
        sm.init(&TABLE, STATES).unwrap();

        for op in ops {
            match op {
                Op::Process(target) => { let _ = sm.process(&TABLE, target); }
                Op::Request(target) => { let _ = sm.request_transition(target); }
                Op::Previous => { let _ = sm.request_previous(); }
                Op::Auto(target) => { let _ = sm.auto_transition(target); }
                Op::Pause => { let _ = sm.pause(&TABLE); }
                Op::Resume => { let _ = sm.resume(&TABLE); }
            }
            prop_assert!(sm.state() < sm.max_states());
            prop_assert!(sm.previous_state() < sm.max_states());
        }
    }

    #[test]
    fn exit_is_always_followed_by_enter(targets in prop::collection::vec(0..STATES + 3, 1..32)) {
        let mut sm = StateMachine::new(Vec::new());
        sm.init(&TABLE, STATES).unwrap();

        for target in targets {
            sm.user_data_mut().clear();
            let before = sm.state();
            let status = sm.process(&TABLE, target);
            let calls = sm.user_data().clone();

            if target < STATES && target != before {
                prop_assert_eq!(status, Ok(Outcome::StateChanged));
                prop_assert_eq!(
                    calls,
                    vec![Call::Process(before), Call::Exit(before), Call::Enter(target)]
                );
                prop_assert_eq!(sm.previous_state(), before);
            } else {
                prop_assert_eq!(status, Ok(Outcome::NoStateChange));
                prop_assert_eq!(calls, vec![Call::Process(before)]);
            }
        }
    }

    #[test]
    fn event_count_tracks_dispatched_events(targets in prop::collection::vec(0..STATES, 0..32)) {
        let mut sm = StateMachine::new(Vec::new());
        sm.init(&TABLE, STATES).unwrap();
        for target in &targets {
            sm.process(&TABLE, *target).unwrap();
        }
        prop_assert_eq!(sm.event_count() as usize, targets.len());
    }

    #[test]
    fn classifier_settles_to_idle(events in prop::collection::vec(arbitrary_event(), 0..200)) {
        let mut c = ButtonClassifier::default();
        for event in events {
            c.process(event).unwrap();
        }

        c.process(ButtonEvent::Up).unwrap();
        feed(&mut c, ButtonEvent::Tick, 100);
        prop_assert_eq!(c.state(), ButtonState::Idle);
    }

    #[test]
    fn gestures_only_latch_on_return_to_idle(events in prop::collection::vec(arbitrary_event(), 0..200)) {
        let mut c = ButtonClassifier::default();
        for event in events {
            c.process(event).unwrap();
            if c.latched().is_some() {
                prop_assert_eq!(c.state(), ButtonState::Idle);
                c.reset_latched();
            }
        }
    }

    #[test]
    fn unknown_codes_are_absorbed(codes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut c = ButtonClassifier::default();
        let mut valid = 0u32;
        for code in codes {
            if ButtonEvent::try_from(code).is_ok() {
                valid += 1;
            }
            c.process_raw(code).unwrap();
        }
        prop_assert_eq!(c.event_count(), valid);
    }

    #[test]
    fn quick_clicks_make_double_click(
        first in 0..4u32,
        gap in 0..16u32,
        second in 0..4u32,
    ) {
        let mut c = ButtonClassifier::new(ButtonTiming::default());
        c.process(ButtonEvent::Down).unwrap();
        feed(&mut c, ButtonEvent::Tick, first);
        c.process(ButtonEvent::Up).unwrap();
        feed(&mut c, ButtonEvent::Tick, gap);
        c.process(ButtonEvent::Down).unwrap();
        feed(&mut c, ButtonEvent::Tick, second);
        c.process(ButtonEvent::Up).unwrap();

        prop_assert_eq!(c.latched(), Gesture::DoubleClick);
    }

    #[test]
    fn held_presses_classify_by_duration(held in 0..60u32) {
        let mut c = ButtonClassifier::default();
        c.process(ButtonEvent::Down).unwrap();
        feed(&mut c, ButtonEvent::Tick, held);
        c.process(ButtonEvent::Up).unwrap();
        feed(&mut c, ButtonEvent::Tick, 16);

        let expected = match held {
            0..=3 => Gesture::Click,
            4..=47 => Gesture::Press,
            _ => Gesture::LongPress,
        };
        prop_assert_eq!(c.latched(), expected);
    }
}
