use crate::state::{ArmyId, ProvinceId, Tag};
use serde::{Deserialize, Serialize};

/// A batch of commands from one nation, applied at the top of a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInputs {
    pub nation: Tag,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// March every non-moving army of the issuing nation from one province
    /// to an adjacent one. This is the shape the UI layer submits.
    MoveAll {
        from: ProvinceId,
        to: ProvinceId,
    },

    /// March a single army to an adjacent province. The AI issues these.
    MoveArmy {
        army: ArmyId,
        destination: ProvinceId,
    },

    /// Raise a new army in an owned province, paying the recruit cost.
    Recruit {
        province: ProvinceId,
    },
}
