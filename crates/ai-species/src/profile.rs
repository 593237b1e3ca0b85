use ai_agent::nodes::{self, CreatureTree};
use ai_agent::{BaseStats, SpeciesHooks, Species};
use ai_group::GroupKind;

use crate::{bear, behemoth, bison, boar, crocodile, stats, tiger, walrus, wolf};

/// Everything needed to build a creature of one species.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesProfile {
    pub species: Species,
    pub stats: BaseStats,
    pub hooks: SpeciesHooks,
    /// Group kind this species spawns into, if it is social.
    pub group: Option<GroupKind>,
}

pub fn profile(species: Species) -> SpeciesProfile {
    let (hooks, group) = match species {
        Species::Wolf => (wolf::hooks(), Some(GroupKind::Pack)),
        Species::Bison => (bison::hooks(), Some(GroupKind::Herd)),
        Species::Boar => (boar::hooks(), None),
        Species::Bear => (bear::hooks(), None),
        Species::Walrus => (walrus::hooks(), None),
        Species::Tiger => (tiger::hooks(), None),
        Species::Crocodile => (crocodile::hooks(), None),
        Species::Behemoth => (behemoth::hooks(), None),
    };
    SpeciesProfile {
        species,
        stats: stats::base_stats(species),
        hooks,
        group,
    }
}

/// Fresh tree for one creature. `seed` feeds random selectors.
pub fn build_tree(species: Species, seed: u64) -> CreatureTree {
    let root = match species {
        Species::Wolf => wolf::tree(),
        Species::Bison => bison::tree(seed),
        Species::Boar => boar::tree(),
        Species::Bear => bear::tree(),
        Species::Walrus => walrus::tree(),
        Species::Tiger => tiger::tree(),
        Species::Crocodile => crocodile::tree(),
        Species::Behemoth => behemoth::tree(),
    };
    nodes::tree(root)
}
