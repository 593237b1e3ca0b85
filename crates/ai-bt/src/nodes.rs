use ai_core::{DeterministicRng, SplitMix64, TickContext};

use crate::bt::{BtFault, BtNode, BtResult, BtStatus};

type Child<A, W> = Box<dyn BtNode<A, W>>;

fn reset_all<A: 'static, W: ?Sized + 'static>(children: &mut [Child<A, W>]) {
    for c in children.iter_mut() {
        c.reset();
    }
}

/// First non-Failure child wins; Failure once every child failed.
pub struct Selector<A, W: ?Sized> {
    children: Vec<Child<A, W>>,
    index: usize,
}

impl<A, W: ?Sized> Selector<A, W> {
    pub fn new(children: Vec<Child<A, W>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Selector<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        while self.index < self.children.len() {
            let child = &mut self.children[self.index];
            match child.tick(ctx, actor, world)? {
                BtStatus::Running => return Ok(BtStatus::Running),
                BtStatus::Success => {
                    self.reset();
                    return Ok(BtStatus::Success);
                }
                BtStatus::Failure => {
                    child.reset();
                    self.index += 1;
                }
            }
        }

        self.reset();
        Ok(BtStatus::Failure)
    }

    fn reset(&mut self) {
        self.index = 0;
        reset_all(&mut self.children);
    }
}

/// First non-Success child wins; Success once every child succeeded.
pub struct Sequence<A, W: ?Sized> {
    children: Vec<Child<A, W>>,
    index: usize,
}

impl<A, W: ?Sized> Sequence<A, W> {
    pub fn new(children: Vec<Child<A, W>>) -> Self {
        Self { children, index: 0 }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Sequence<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        while self.index < self.children.len() {
            let child = &mut self.children[self.index];
            match child.tick(ctx, actor, world)? {
                BtStatus::Running => return Ok(BtStatus::Running),
                BtStatus::Failure => {
                    self.reset();
                    return Ok(BtStatus::Failure);
                }
                BtStatus::Success => {
                    child.reset();
                    self.index += 1;
                }
            }
        }

        self.reset();
        Ok(BtStatus::Success)
    }

    fn reset(&mut self) {
        self.index = 0;
        reset_all(&mut self.children);
    }
}

/// Ticks every child every tick.
///
/// Succeeds once `success_threshold` children succeeded in the same tick and
/// fails as soon as that count can no longer be reached. Children that finish
/// while the parallel keeps running are restarted on the next tick.
pub struct Parallel<A, W: ?Sized> {
    children: Vec<Child<A, W>>,
    success_threshold: usize,
}

impl<A, W: ?Sized> Parallel<A, W> {
    pub fn new(success_threshold: usize, children: Vec<Child<A, W>>) -> Self {
        let success_threshold = success_threshold.min(children.len());
        Self {
            children,
            success_threshold,
        }
    }

    pub fn success_threshold(&self) -> usize {
        self.success_threshold
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Parallel<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        let mut successes = 0usize;
        let mut running = 0usize;

        for child in self.children.iter_mut() {
            match child.tick(ctx, actor, world)? {
                BtStatus::Success => {
                    successes += 1;
                    child.reset();
                }
                BtStatus::Failure => child.reset(),
                BtStatus::Running => running += 1,
            }
        }

        if successes >= self.success_threshold {
            self.reset();
            return Ok(BtStatus::Success);
        }
        if successes + running < self.success_threshold {
            self.reset();
            return Ok(BtStatus::Failure);
        }
        Ok(BtStatus::Running)
    }

    fn reset(&mut self) {
        reset_all(&mut self.children);
    }
}

pub struct Inverter<A, W: ?Sized> {
    child: Child<A, W>,
}

impl<A, W: ?Sized> Inverter<A, W> {
    pub fn new(child: Child<A, W>) -> Self {
        Self { child }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Inverter<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        let status = match self.child.tick(ctx, actor, world)? {
            BtStatus::Running => return Ok(BtStatus::Running),
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
        };
        self.child.reset();
        Ok(status)
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    /// Succeed after `n` successful child runs; fail on the first child failure.
    Times(u32),
    /// Restart the child after every completed run, never terminating.
    Forever,
}

/// Re-runs its child. At most one child run completes per tick.
pub struct Repeater<A, W: ?Sized> {
    child: Child<A, W>,
    mode: RepeatMode,
    completed: u32,
}

impl<A, W: ?Sized> Repeater<A, W> {
    pub fn new(mode: RepeatMode, child: Child<A, W>) -> Self {
        Self {
            child,
            mode,
            completed: 0,
        }
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Repeater<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        if let RepeatMode::Times(0) = self.mode {
            return Ok(BtStatus::Success);
        }

        let status = self.child.tick(ctx, actor, world)?;
        if status.is_running() {
            return Ok(BtStatus::Running);
        }
        self.child.reset();

        match self.mode {
            RepeatMode::Forever => {
                self.completed = self.completed.saturating_add(1);
                Ok(BtStatus::Running)
            }
            RepeatMode::Times(n) => {
                if status == BtStatus::Failure {
                    self.reset();
                    return Ok(BtStatus::Failure);
                }
                self.completed += 1;
                if self.completed >= n {
                    self.reset();
                    Ok(BtStatus::Success)
                } else {
                    Ok(BtStatus::Running)
                }
            }
        }
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.child.reset();
    }
}

/// Success whenever the child finishes, regardless of its result.
pub struct Succeeder<A, W: ?Sized> {
    child: Child<A, W>,
}

impl<A, W: ?Sized> Succeeder<A, W> {
    pub fn new(child: Child<A, W>) -> Self {
        Self { child }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Succeeder<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        match self.child.tick(ctx, actor, world)? {
            BtStatus::Running => Ok(BtStatus::Running),
            _ => {
                self.child.reset();
                Ok(BtStatus::Success)
            }
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Keeps re-running the child until it fails, then succeeds.
pub struct UntilFail<A, W: ?Sized> {
    child: Child<A, W>,
}

impl<A, W: ?Sized> UntilFail<A, W> {
    pub fn new(child: Child<A, W>) -> Self {
        Self { child }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for UntilFail<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        match self.child.tick(ctx, actor, world)? {
            BtStatus::Failure => {
                self.child.reset();
                Ok(BtStatus::Success)
            }
            BtStatus::Success => {
                self.child.reset();
                Ok(BtStatus::Running)
            }
            BtStatus::Running => Ok(BtStatus::Running),
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

type Predicate<A, W> = Box<dyn FnMut(&TickContext, &A, &W) -> bool>;
type FalliblePredicate<A, W> = Box<dyn FnMut(&TickContext, &A, &W) -> Result<bool, BtFault>>;
type Step<A, W> = Box<dyn FnMut(&TickContext, &mut A, &mut W) -> BtResult>;

/// Pure predicate leaf.
pub struct Condition<A, W: ?Sized> {
    check: Predicate<A, W>,
}

impl<A, W: ?Sized> Condition<A, W> {
    pub fn new(check: impl FnMut(&TickContext, &A, &W) -> bool + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Condition<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        Ok(BtStatus::from_bool((self.check)(ctx, &*actor, &*world)))
    }

    fn reset(&mut self) {}
}

/// Predicate leaf that may fault instead of answering.
pub struct TryCondition<A, W: ?Sized> {
    check: FalliblePredicate<A, W>,
}

impl<A, W: ?Sized> TryCondition<A, W> {
    pub fn new(check: impl FnMut(&TickContext, &A, &W) -> Result<bool, BtFault> + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for TryCondition<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        (self.check)(ctx, &*actor, &*world).map(BtStatus::from_bool)
    }

    fn reset(&mut self) {}
}

/// Side-effecting leaf.
///
/// The closure is called on every tick the node is reached; any state it needs
/// across ticks lives in the actor.
pub struct Action<A, W: ?Sized> {
    step: Step<A, W>,
}

impl<A, W: ?Sized> Action<A, W> {
    pub fn new(step: impl FnMut(&TickContext, &mut A, &mut W) -> BtResult + 'static) -> Self {
        Self {
            step: Box::new(step),
        }
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Action<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        (self.step)(ctx, actor, world)
    }

    fn reset(&mut self) {}
}

/// Running until `seconds` of simulated time have accumulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    seconds: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds: seconds.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for Wait {
    fn tick(&mut self, ctx: &TickContext, _actor: &mut A, _world: &mut W) -> BtResult {
        self.elapsed += ctx.dt_seconds.max(0.0);
        if self.elapsed >= self.seconds {
            self.elapsed = 0.0;
            Ok(BtStatus::Success)
        } else {
            Ok(BtStatus::Running)
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Picks one child uniformly and stays on it until it stops running.
pub struct RandomSelector<A, W: ?Sized> {
    children: Vec<Child<A, W>>,
    rng: SplitMix64,
    committed: Option<usize>,
}

impl<A, W: ?Sized> RandomSelector<A, W> {
    pub fn new(seed: u64, children: Vec<Child<A, W>>) -> Self {
        Self {
            children,
            rng: SplitMix64::new(seed),
            committed: None,
        }
    }

    pub fn committed(&self) -> Option<usize> {
        self.committed
    }
}

impl<A: 'static, W: ?Sized + 'static> BtNode<A, W> for RandomSelector<A, W> {
    fn tick(&mut self, ctx: &TickContext, actor: &mut A, world: &mut W) -> BtResult {
        if self.children.is_empty() {
            return Ok(BtStatus::Failure);
        }

        let index = match self.committed {
            Some(i) => i,
            None => {
                let i = self.rng.next_index(self.children.len());
                self.committed = Some(i);
                i
            }
        };

        let status = self.children[index].tick(ctx, actor, world)?;
        if status.is_terminal() {
            self.children[index].reset();
            self.committed = None;
        }
        Ok(status)
    }

    fn reset(&mut self) {
        self.committed = None;
        reset_all(&mut self.children);
    }
}
