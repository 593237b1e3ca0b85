//! Tree plumbing specialised to agents.
//!
//! Species layers build their trees from these helpers so every leaf closure
//! gets `(ctx, agent, world)` with concrete types.

use ai_bt::{
    Action, BehaviorTree, BtFault, BtNode, BtResult, Condition, Inverter, Parallel,
    RandomSelector, RepeatMode, Repeater, Selector, Sequence, Succeeder, TryCondition, UntilFail,
    Wait,
};
use ai_core::TickContext;

use crate::agent::Agent;
use crate::world::World;

pub type CreatureNode = Box<dyn BtNode<Agent, dyn World>>;
pub type CreatureTree = BehaviorTree<Agent, dyn World>;

pub fn tree(root: CreatureNode) -> CreatureTree {
    BehaviorTree::new(root)
}

pub fn condition<F>(check: F) -> CreatureNode
where
    F: FnMut(&TickContext, &Agent, &(dyn World + 'static)) -> bool + 'static,
{
    Box::new(Condition::new(check))
}

pub fn try_condition<F>(check: F) -> CreatureNode
where
    F: FnMut(&TickContext, &Agent, &(dyn World + 'static)) -> Result<bool, BtFault> + 'static,
{
    Box::new(TryCondition::new(check))
}

pub fn action<F>(step: F) -> CreatureNode
where
    F: FnMut(&TickContext, &mut Agent, &mut (dyn World + 'static)) -> BtResult + 'static,
{
    Box::new(Action::new(step))
}

pub fn selector(children: Vec<CreatureNode>) -> CreatureNode {
    Box::new(Selector::new(children))
}

pub fn sequence(children: Vec<CreatureNode>) -> CreatureNode {
    Box::new(Sequence::new(children))
}

pub fn parallel(success_threshold: usize, children: Vec<CreatureNode>) -> CreatureNode {
    Box::new(Parallel::new(success_threshold, children))
}

pub fn inverter(child: CreatureNode) -> CreatureNode {
    Box::new(Inverter::new(child))
}

pub fn succeeder(child: CreatureNode) -> CreatureNode {
    Box::new(Succeeder::new(child))
}

pub fn until_fail(child: CreatureNode) -> CreatureNode {
    Box::new(UntilFail::new(child))
}

pub fn repeat(mode: RepeatMode, child: CreatureNode) -> CreatureNode {
    Box::new(Repeater::new(mode, child))
}

pub fn wait(seconds: f32) -> CreatureNode {
    Box::new(Wait::new(seconds))
}

pub fn random(seed: u64, children: Vec<CreatureNode>) -> CreatureNode {
    Box::new(RandomSelector::new(seed, children))
}
