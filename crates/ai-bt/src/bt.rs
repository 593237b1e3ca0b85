use ai_core::TickContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_running(self) -> bool {
        self == BtStatus::Running
    }

    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    pub fn from_bool(ok: bool) -> Self {
        if ok {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

/// A leaf could not complete its step because its inputs were inconsistent.
///
/// A vanished target is *not* a fault; leaves report that as
/// [`BtStatus::Failure`]. Faults propagate unchanged to the tree root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BtFault {
    #[error("stale reference: {0}")]
    StaleReference(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("node panicked: {0}")]
    Panicked(String),
}

pub type BtResult = Result<BtStatus, BtFault>;

pub trait BtNode<A, W: ?Sized>: 'static {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult;

    /// Clears resumption memory of this node and every descendant.
    fn reset(&mut self);
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Box<dyn BtNode<A, W>> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        (**self).tick(ctx, actor, world)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
