use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::array::ArrayModel;
use crate::step::{LineSet, Mutation, Step};

/// Identifies one run session. Increases every time a run starts.
pub type SessionId = u64;

/// Consumer of published steps (bar renderer, code panel, tests).
///
/// Observers are called synchronously in publish order. They may read the
/// model but never mutate it.
pub trait StepObserver {
    fn on_step(&mut self, session: SessionId, step: &Step, model: &ArrayModel);
    fn on_cleared(&mut self, session: SessionId);
}

impl<T: StepObserver> StepObserver for Rc<RefCell<T>> {
    fn on_step(&mut self, session: SessionId, step: &Step, model: &ArrayModel) {
        self.borrow_mut().on_step(session, step, model);
    }

    fn on_cleared(&mut self, session: SessionId) {
        self.borrow_mut().on_cleared(session);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Step {
        session: SessionId,
        step: Step,
        values: Vec<i32>,
    },
    Cleared {
        session: SessionId,
    },
}

/// Forwards every notification, with a copy of the values, over a channel.
pub struct ChannelObserver {
    tx: Sender<EngineEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl StepObserver for ChannelObserver {
    fn on_step(&mut self, session: SessionId, step: &Step, model: &ArrayModel) {
        // a dropped receiver just means nobody is listening anymore
        let _ = self.tx.send(EngineEvent::Step {
            session,
            step: step.clone(),
            values: model.values().to_vec(),
        });
    }

    fn on_cleared(&mut self, session: SessionId) {
        let _ = self.tx.send(EngineEvent::Cleared { session });
    }
}

/// The latest highlight state, as the renderers need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub session: SessionId,
    pub active_lines: LineSet,
    pub highlighted: BTreeSet<usize>,
    pub last_mutation: Option<Mutation>,
    pub steps_seen: usize,
}

impl Projection {
    pub fn is_line_active(&self, line: usize) -> bool {
        self.active_lines.contains(&line)
    }

    pub fn is_highlighted(&self, position: usize) -> bool {
        self.highlighted.contains(&position)
    }
}

impl StepObserver for Projection {
    fn on_step(&mut self, session: SessionId, step: &Step, _model: &ArrayModel) {
        if session != self.session {
            self.session = session;
            self.steps_seen = 0;
        }
        self.active_lines = step.lines.clone();
        self.highlighted = step.highlighted.clone();
        self.last_mutation = step.mutation;
        self.steps_seen += 1;
    }

    fn on_cleared(&mut self, session: SessionId) {
        self.session = session;
        self.active_lines.clear();
        self.highlighted.clear();
        self.last_mutation = None;
    }
}
