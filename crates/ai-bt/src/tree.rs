use ai_core::TickContext;

use crate::bt::{BtFault, BtNode, BtStatus};

/// Root wrapper owned by whoever drives the tree.
///
/// Resets the root after every terminal status so the next tick starts a fresh
/// evaluation, and after a fault so no half-finished memory survives.
pub struct BehaviorTree<A, W: ?Sized> {
    root: Box<dyn BtNode<A, W>>,
    last: BtStatus,
    ticks: u64,
}

impl<A: 'static, W: ?Sized + 'static> BehaviorTree<A, W> {
    pub fn new(root: Box<dyn BtNode<A, W>>) -> Self {
        Self {
            root,
            last: BtStatus::Running,
            ticks: 0,
        }
    }

    pub fn from_node(root: impl BtNode<A, W>) -> Self {
        Self::new(Box::new(root))
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        actor: &mut A,
        world: &mut W,
    ) -> Result<BtStatus, BtFault> {
        self.ticks = self.ticks.wrapping_add(1);
        match self.root.tick(ctx, actor, world) {
            Ok(status) => {
                self.last = status;
                if status.is_terminal() {
                    self.root.reset();
                }
                Ok(status)
            }
            Err(fault) => {
                self.last = BtStatus::Failure;
                self.root.reset();
                Err(fault)
            }
        }
    }

    /// Forced reset, e.g. when the actor's target was cleared externally.
    pub fn reset(&mut self) {
        self.root.reset();
        self.last = BtStatus::Running;
    }

    pub fn last_status(&self) -> BtStatus {
        self.last
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
