#![allow(dead_code)]

use std::collections::VecDeque;

use ai_bt::{BtNode, BtResult, BtStatus};
use ai_core::TickContext;

/// Actor used by the engine tests: records which leaves ran.
#[derive(Debug, Default)]
pub struct Trace {
    pub calls: Vec<&'static str>,
}

/// Leaf that replays a fixed script of statuses, repeating the last one.
pub struct Scripted {
    name: &'static str,
    script: VecDeque<BtStatus>,
    last: BtStatus,
}

impl Scripted {
    pub fn new(name: &'static str, script: &[BtStatus]) -> Box<dyn BtNode<Trace, ()>> {
        Box::new(Self {
            name,
            script: script.iter().copied().collect(),
            last: script.last().copied().unwrap_or(BtStatus::Success),
        })
    }

    pub fn always(name: &'static str, status: BtStatus) -> Box<dyn BtNode<Trace, ()>> {
        Self::new(name, &[status])
    }
}

impl BtNode<Trace, ()> for Scripted {
    fn tick(&mut self, _ctx: &TickContext, actor: &mut Trace, _world: &mut ()) -> BtResult {
        actor.calls.push(self.name);
        Ok(self.script.pop_front().unwrap_or(self.last))
    }

    fn reset(&mut self) {}
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1, tick as f64 * 0.1, 7)
}

pub fn node<W: ?Sized + 'static>(n: impl BtNode<Trace, W>) -> Box<dyn BtNode<Trace, W>> {
    Box::new(n)
}
