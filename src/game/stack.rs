//! Effect stack: the control-flow backbone of the engine
//!
//! The stack holds everything the engine still has to do. A phase handler
//! that needs outside input pushes a continuation of itself and yields, so
//! the engine's whole continuation is the stack contents.

use crate::core::{EffectKind, PlayerId};
use crate::game::Phase;
use serde::{Deserialize, Serialize};

pub const STACK_SIZE: usize = 100;

/// An effect waiting to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub kind: EffectKind,
    /// Player who cast or played the source
    pub controller: PlayerId,
    /// Index into the controller's opponent's board
    pub target: usize,
}

impl PendingEffect {
    pub fn new(kind: EffectKind, controller: PlayerId) -> Self {
        PendingEffect {
            kind,
            controller,
            target: 0,
        }
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackItem {
    /// Resume this phase handler
    Phase(Phase),
    /// Resolve this effect
    Effect(PendingEffect),
}

/// Bounded LIFO of pending work
///
/// Overflow and underflow are sequencing bugs, not game outcomes, and panic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStack {
    items: Vec<StackItem>,
    capacity: usize,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::with_capacity(STACK_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EffectStack {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: StackItem) {
        assert!(
            self.items.len() < self.capacity,
            "effect stack overflow (capacity {}) while pushing {:?}",
            self.capacity,
            item
        );
        self.items.push(item);
    }

    pub fn push_phase(&mut self, phase: Phase) {
        self.push(StackItem::Phase(phase));
    }

    pub fn push_effect(&mut self, effect: PendingEffect) {
        self.push(StackItem::Effect(effect));
    }

    /// Pop the top item. Panics on an empty stack; `peek` first when that
    /// is a legal state.
    pub fn pop(&mut self) -> StackItem {
        match self.items.pop() {
            Some(item) => item,
            None => panic!("effect stack underflow: popped a drained stack"),
        }
    }

    pub fn peek(&self) -> Option<&StackItem> {
        self.items.last()
    }

    /// Phase identity on top of the stack, if the top is a phase
    pub fn top_phase(&self) -> Option<Phase> {
        match self.peek() {
            Some(StackItem::Phase(phase)) => Some(*phase),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items from bottom to top
    pub fn items(&self) -> &[StackItem] {
        &self.items
    }
}

impl Default for EffectStack {
    fn default() -> Self {
        Self::new()
    }
}
