use anyhow::{bail, Result};
use modalkeys::command::{MotionKind, Operation, OperatorKind, ParseError, TargetRange};
use modalkeys::config::Config;
use modalkeys::input::{InputState, KeyTranslator, KeyboardLayout};
use modalkeys::mode::{
    Executor, InsertMode, KeyOutcome, Mode, ModeDispatcher, ModeName, NormalMode, Resolution,
    StatusDisplay,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    queues: Vec<Vec<Operation>>,
}

impl Executor for Recorder {
    fn execute(&mut self, operations: Vec<Operation>) {
        self.queues.push(operations);
    }
}

#[derive(Default)]
struct Status {
    shown: Vec<String>,
}

impl StatusDisplay for Status {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}

fn dispatcher() -> ModeDispatcher<Recorder, Status> {
    ModeDispatcher::new(&Config::default(), Recorder::default(), Status::default()).unwrap()
}

fn identity() -> Box<dyn KeyTranslator> {
    Box::new(KeyboardLayout::default())
}

#[test]
fn test_starts_in_normal_with_empty_status() {
    let d = dispatcher();
    assert_eq!(d.active_mode(), ModeName::Normal);
    assert_eq!(d.status_text(), "");
    assert_eq!(d.status().shown, vec![String::new()]);
}

#[test]
fn test_resolved_sequence_reaches_executor_once() {
    let mut d = dispatcher();

    assert_eq!(d.handle_key_event("d").unwrap(), KeyOutcome::AwaitingInput);
    assert!(d.executor().queues.is_empty());
    assert_eq!(d.pending_keys(), &["d".to_string()]);

    assert_eq!(d.handle_key_event("d").unwrap(), KeyOutcome::Executed);
    assert_eq!(
        d.executor().queues,
        vec![vec![
            Operation::operator_on(OperatorKind::Delete, TargetRange::FullLine),
            Operation::StopRequestingInput,
        ]]
    );
    assert!(d.pending_keys().is_empty());
    assert!(d.pending_queue().is_empty());
}

#[test]
fn test_rejected_sequence_executes_nothing() {
    let mut d = dispatcher();
    let outcome = d.handle_key_event("Q").unwrap();

    assert_eq!(
        outcome,
        KeyOutcome::Rejected(vec![ParseError::UnknownCommand {
            sequence: "Q".to_string()
        }])
    );
    assert!(d.executor().queues.is_empty());
    assert_eq!(d.active_mode(), ModeName::Normal);

    // The next sequence starts clean.
    assert_eq!(d.handle_key_event("x").unwrap(), KeyOutcome::Executed);
}

#[test]
fn test_insert_key_switches_mode() {
    let mut d = dispatcher();

    assert_eq!(d.handle_key_event("i").unwrap(), KeyOutcome::Executed);
    assert_eq!(d.active_mode(), ModeName::Insert);
    assert_eq!(d.status().shown.last().map(String::as_str), Some("INSERT"));
    assert_eq!(
        d.executor().queues,
        vec![vec![Operation::change_mode("i"), Operation::StopRequestingInput]]
    );
}

#[test]
fn test_append_runs_activation_effect() {
    let mut d = dispatcher();
    d.handle_key_event("A").unwrap();

    assert_eq!(d.active_mode(), ModeName::Insert);
    assert_eq!(
        d.executor().queues.last(),
        Some(&vec![Operation::motion(MotionKind::LineEnd)])
    );
}

#[test]
fn test_insert_mode_types_text_until_escape() {
    let mut d = dispatcher();
    d.feed(["i", "h", "space"]).unwrap();

    assert_eq!(d.active_mode(), ModeName::Insert);
    let typed: Vec<_> = d.executor().queues[1..].to_vec();
    assert_eq!(
        typed,
        vec![
            vec![
                Operation::operator(OperatorKind::Insert("h".to_string())),
                Operation::StopRequestingInput,
            ],
            vec![
                Operation::operator(OperatorKind::Insert(" ".to_string())),
                Operation::StopRequestingInput,
            ],
        ]
    );

    assert_eq!(
        d.handle_key_event("esc").unwrap(),
        KeyOutcome::ModeRequested("esc".to_string())
    );
    assert_eq!(d.active_mode(), ModeName::Normal);
    assert_eq!(d.status_text(), "");
    assert_eq!(d.status().shown.last().map(String::as_str), Some(""));
    assert_eq!(
        d.executor().queues.last(),
        Some(&vec![Operation::motion(MotionKind::Left)])
    );
}

#[test]
fn test_ctrl_bracket_also_leaves_insert() {
    let mut d = dispatcher();
    d.handle_key_event("i").unwrap();
    d.handle_key_event("ctrl+[").unwrap();
    assert_eq!(d.active_mode(), ModeName::Normal);
}

#[test]
fn test_escape_in_normal_is_unclaimed() {
    let mut d = dispatcher();

    let outcome = d.handle_key_event("esc").unwrap();
    assert_eq!(outcome, KeyOutcome::ModeRequested("esc".to_string()));
    assert_eq!(d.active_mode(), ModeName::Normal);
    assert!(d.pending_keys().is_empty());
    assert!(d.executor().queues.is_empty());
}

#[test]
fn test_change_word_executes_then_enters_insert() {
    let mut d = dispatcher();
    assert_eq!(
        d.feed(["c", "w"]).unwrap(),
        vec![KeyOutcome::AwaitingInput, KeyOutcome::Executed]
    );

    assert_eq!(d.active_mode(), ModeName::Insert);
    assert_eq!(
        d.executor().queues,
        vec![vec![
            Operation::operator(OperatorKind::Delete),
            Operation::change_mode("i"),
            Operation::selecting(MotionKind::WordRight),
            Operation::StopRequestingInput,
        ]]
    );
}

#[test]
fn test_visual_operator_returns_to_normal() {
    let mut d = dispatcher();
    d.handle_key_event("v").unwrap();
    assert_eq!(d.active_mode(), ModeName::Visual);
    assert_eq!(d.status_text(), "VISUAL");

    d.handle_key_event("w").unwrap();
    assert_eq!(
        d.executor().queues.last(),
        Some(&vec![
            Operation::selecting(MotionKind::WordRight),
            Operation::StopRequestingInput,
        ])
    );

    d.handle_key_event("d").unwrap();
    assert_eq!(d.active_mode(), ModeName::Normal);
    assert!(d.executor().queues.contains(&vec![
        Operation::operator(OperatorKind::Delete),
        Operation::change_mode("esc"),
        Operation::StopRequestingInput,
    ]));
}

#[test]
fn test_visual_key_ignored_outside_normal() {
    let mut d = dispatcher();
    d.feed(["i", "v"]).unwrap();

    assert_eq!(d.active_mode(), ModeName::Insert);
    assert_eq!(
        d.executor().queues.last(),
        Some(&vec![
            Operation::operator(OperatorKind::Insert("v".to_string())),
            Operation::StopRequestingInput,
        ])
    );
}

#[test]
fn test_unclaimed_mode_change_keeps_mode() {
    let mut d = dispatcher();
    assert!(!d.handle_mode_change("z").unwrap());
    assert_eq!(d.active_mode(), ModeName::Normal);
    assert_eq!(d.status().shown.len(), 1);
}

#[test]
fn test_reset_drops_pending_keys() {
    let mut d = dispatcher();
    d.feed(["d", "a"]).unwrap();
    assert_eq!(d.pending_keys().len(), 2);

    d.reset();
    assert!(d.pending_keys().is_empty());
    assert!(d.pending_queue().is_empty());
}

#[test]
fn test_layout_translates_before_parsing() {
    let config = Config {
        keyboard_layout: "de-DE (QWERTZ)".to_string(),
        ..Config::default()
    };
    let mut d = ModeDispatcher::new(&config, Recorder::default(), Status::default()).unwrap();

    // The host reports "z" for the key labelled "y".
    d.feed(["z", "z"]).unwrap();
    assert_eq!(
        d.executor().queues,
        vec![vec![
            Operation::operator_on(OperatorKind::Copy, TargetRange::FullLine),
            Operation::StopRequestingInput,
        ]]
    );
}

#[test]
fn test_key_remap_applies_after_layout() {
    let mut key_remap = BTreeMap::new();
    key_remap.insert("ctrl+c".to_string(), "esc".to_string());
    let config = Config {
        key_remap,
        ..Config::default()
    };
    let mut d = ModeDispatcher::new(&config, Recorder::default(), Status::default()).unwrap();

    d.handle_key_event("i").unwrap();
    d.handle_key_event("ctrl+c").unwrap();
    assert_eq!(d.active_mode(), ModeName::Normal);
}

#[test]
fn test_unknown_layout_is_an_error() {
    let config = Config {
        keyboard_layout: "dvorak".to_string(),
        ..Config::default()
    };
    let result = ModeDispatcher::new(&config, Recorder::default(), Status::default());
    assert!(result.is_err());
}

#[test]
fn test_custom_terminator_from_config() {
    let config = Config {
        argument_terminator: "tab".to_string(),
        ..Config::default()
    };
    let mut d = ModeDispatcher::new(&config, Recorder::default(), Status::default()).unwrap();

    let outcomes = d.feed(["t", "a", "enter", "tab"]).unwrap();
    assert_eq!(outcomes.last(), Some(&KeyOutcome::Executed));
    assert_eq!(
        d.executor().queues,
        vec![vec![
            Operation::motion(MotionKind::Until("aenter".to_string())),
            Operation::StopRequestingInput,
        ]]
    );
}

#[test]
fn test_dispatcher_requires_normal_mode() {
    let modes: Vec<Box<dyn Mode>> = vec![Box::new(InsertMode)];
    let result =
        ModeDispatcher::with_modes(modes, identity(), Recorder::default(), Status::default());
    assert!(result.is_err());
}

/// A mode that claims a fixed key and records its lifecycle hooks.
struct ScriptedMode {
    name: ModeName,
    claims: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    fail_activation: bool,
    fail_deactivation: bool,
}

impl ScriptedMode {
    fn new(name: ModeName, claims: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            name,
            claims,
            log: Rc::clone(log),
            fail_activation: false,
            fail_deactivation: false,
        }
    }
}

impl Mode for ScriptedMode {
    fn name(&self) -> ModeName {
        self.name
    }

    fn should_be_activated(&self, key: &str, _current: ModeName) -> bool {
        key == self.claims
    }

    fn handle_activation(&self, key: &str) -> Result<Vec<Operation>> {
        self.log.borrow_mut().push(format!("enter {} {}", self.name, key));
        if self.fail_activation {
            bail!("activation refused");
        }
        Ok(Vec::new())
    }

    fn handle_deactivation(&self) -> Result<Vec<Operation>> {
        self.log.borrow_mut().push(format!("leave {}", self.name));
        if self.fail_deactivation {
            bail!("deactivation refused");
        }
        Ok(vec![Operation::operator(OperatorKind::Undo)])
    }

    fn handle_keys(&self, state: &mut InputState) -> Resolution {
        let key = state.next().unwrap_or_default();
        state.reset();
        Resolution::ModeChange(key)
    }
}

fn scripted(name: ModeName, claims: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Mode> {
    Box::new(ScriptedMode::new(name, claims, log))
}

fn with_modes(modes: Vec<Box<dyn Mode>>) -> ModeDispatcher<Recorder, Status> {
    ModeDispatcher::with_modes(modes, identity(), Recorder::default(), Status::default()).unwrap()
}

#[test]
fn test_last_claiming_mode_wins() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        scripted(ModeName::Insert, "g", &log),
        scripted(ModeName::Visual, "g", &log),
    ]);

    assert!(d.handle_mode_change("g").unwrap());
    assert_eq!(d.active_mode(), ModeName::Visual);
    assert_eq!(d.status_text(), "VISUAL");
}

#[test]
fn test_active_mode_never_reactivated() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        scripted(ModeName::Insert, "g", &log),
    ]);

    assert!(d.handle_mode_change("g").unwrap());
    assert!(!d.handle_mode_change("g").unwrap());
    assert_eq!(*log.borrow(), vec!["enter INSERT g".to_string()]);
}

#[test]
fn test_deactivation_runs_before_activation() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        scripted(ModeName::Insert, "g", &log),
        scripted(ModeName::Visual, "h", &log),
    ]);

    d.handle_mode_change("g").unwrap();
    // Scripted modes turn every key into a mode change request.
    assert_eq!(
        d.handle_key_event("h").unwrap(),
        KeyOutcome::ModeRequested("h".to_string())
    );

    assert_eq!(d.active_mode(), ModeName::Visual);
    assert_eq!(
        *log.borrow(),
        vec![
            "enter INSERT g".to_string(),
            "leave INSERT".to_string(),
            "enter VISUAL h".to_string(),
        ]
    );
    assert_eq!(
        d.executor().queues,
        vec![vec![Operation::operator(OperatorKind::Undo)]]
    );
}

#[test]
fn test_failed_activation_is_reported() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        Box::new(ScriptedMode {
            fail_activation: true,
            ..ScriptedMode::new(ModeName::Insert, "g", &log)
        }),
    ]);

    let err = d.handle_mode_change("g").unwrap_err();
    assert!(format!("{:#}", err).contains("activation refused"));
    assert_eq!(d.active_mode(), ModeName::Insert);
}

#[test]
fn test_failed_deactivation_keeps_old_mode() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        Box::new(ScriptedMode {
            fail_deactivation: true,
            ..ScriptedMode::new(ModeName::Insert, "g", &log)
        }),
        scripted(ModeName::Visual, "h", &log),
    ]);

    d.handle_mode_change("g").unwrap();
    let shown = d.status().shown.len();

    let err = d.handle_key_event("h").unwrap_err();
    assert!(format!("{:#}", err).contains("deactivation refused"));

    assert_eq!(d.active_mode(), ModeName::Insert);
    assert_eq!(d.status_text(), "INSERT");
    assert_eq!(d.status().shown.len(), shown);
    assert!(d.executor().queues.is_empty());
    assert!(d.pending_keys().is_empty());
    assert_eq!(
        *log.borrow(),
        vec!["enter INSERT g".to_string(), "leave INSERT".to_string()]
    );
}

#[test]
fn test_failed_activation_during_key_event_drops_sequence() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut d = with_modes(vec![
        Box::new(NormalMode::default()),
        Box::new(ScriptedMode {
            fail_activation: true,
            ..ScriptedMode::new(ModeName::Insert, "i", &log)
        }),
    ]);

    assert_eq!(d.handle_key_event("c").unwrap(), KeyOutcome::AwaitingInput);
    assert_eq!(d.pending_keys(), &["c".to_string()]);

    let err = d.handle_key_event("w").unwrap_err();
    assert!(format!("{:#}", err).contains("activation refused"));
    assert!(d.pending_keys().is_empty());
    assert!(d.pending_queue().is_empty());

    // The resolved queue went out before the mode change was attempted.
    assert_eq!(d.executor().queues.len(), 1);
    assert_eq!(d.active_mode(), ModeName::Insert);

    // The next key starts a fresh sequence in the new mode.
    assert_eq!(
        d.handle_key_event("z").unwrap(),
        KeyOutcome::ModeRequested("z".to_string())
    );
}
