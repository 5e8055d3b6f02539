//! Session façade tests: the sequence a host UI drives.

use edu6502::{AssembleError, Event, Session, SimulatorConfig, SimulatorState, StopReason};
use std::cell::RefCell;
use std::rc::Rc;

fn recorded(session: &Session) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn test_initial_state() {
    let session = Session::new(SimulatorConfig::default());
    assert_eq!(session.state(), SimulatorState::Initialized);
    assert_eq!(session.registers().pc, 0x0600);
}

#[test]
fn test_assemble_event_sequence() {
    let mut session = Session::default();
    let log = recorded(&session);

    session.assemble("start: LDA #$01").unwrap();

    let names: Vec<&str> = log.borrow().iter().map(Event::name).collect();
    assert_eq!(
        names,
        vec![
            "reset",
            "assemble-info",
            "assemble-info",
            "labels-info",
            "assemble-info",
            "assemble-success",
        ]
    );
}

#[test]
fn test_failed_assembly_reports_and_returns() {
    let mut session = Session::default();
    let log = recorded(&session);

    let err = session.assemble("NOP\nBNE nowhere").unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert!(matches!(err, AssembleError::Syntax { .. }));
    assert!(log
        .borrow()
        .iter()
        .any(|event| event.name() == "assemble-failure"));
}

#[test]
fn test_hexdump_and_disassemble() {
    let mut session = Session::default();
    let log = recorded(&session);
    session.assemble("LDA #$01\nSTA $0200").unwrap();

    assert_eq!(session.hexdump(), "0600: a9 01 8d 00 02 ");
    assert_eq!(session.disassemble().len(), 2);

    let names: Vec<&str> = log.borrow().iter().map(Event::name).collect();
    assert!(names.ends_with(&["hexdump", "disassembly"]));
}

#[test]
fn test_stepper_then_run() {
    let mut session = Session::default();
    session.assemble("INX\nINX\nINX").unwrap();

    session.enable_stepper(true);
    session.debug_exec_step().unwrap();
    assert_eq!(session.registers().x, 1);
    assert_eq!(session.state(), SimulatorState::DebuggingPaused);

    session.run_binary();
    assert_eq!(session.state(), SimulatorState::Debugging);
    assert_eq!(session.tick().unwrap(), 0);

    session.enable_stepper(false);
    session.tick().unwrap();
    assert_eq!(session.registers().x, 3);
    assert_eq!(session.state(), SimulatorState::Stopped);
}

#[test]
fn test_reset_after_run() {
    let mut session = Session::default();
    let log = recorded(&session);
    session.assemble("LDA #$07\nSTA $0200").unwrap();
    session.run_binary();
    session.tick().unwrap();

    assert!(log.borrow().contains(&Event::Stop {
        reason: StopReason::ProgramEnd { pc: 0x0605 }
    }));

    session.reset();
    assert_eq!(session.display().borrow().pixel(0, 0), 0);
    assert_eq!(session.state(), SimulatorState::Ready);
}
