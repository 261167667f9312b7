use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};

/// Which mint entry point is currently admissible. All owner-set
/// transitions are allowed, including setting the current stage again.
#[cw_serde]
#[derive(Copy)]
pub enum Stage {
    Closed,
    Whitelist,
    Public,
}

impl Stage {
    /// Wire form used by `SetStage` and the per-wallet tally key.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Stage::Closed),
            1 => Some(Stage::Whitelist),
            2 => Some(Stage::Public),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Stage::Closed => 0,
            Stage::Whitelist => 1,
            Stage::Public => 2,
        }
    }
}

/// Price and per-wallet cap for one paid phase.
#[cw_serde]
#[derive(Default)]
pub struct MintParams {
    pub price: Uint128,
    pub max_per_wallet: u32,
}

pub const ADMIN: Admin = Admin::new("admin");

pub const STAGE: Item<Stage> = Item::new("stage");
pub const WHITELIST_PARAMS: Item<MintParams> = Item::new("whitelist_params");
pub const PUBLIC_PARAMS: Item<MintParams> = Item::new("public_params");

/// Hex-encoded allowlist commitment. Stored verbatim, no format
/// validation; a malformed root simply never verifies.
pub const MERKLE_ROOT: Item<String> = Item::new("merkle_root");

pub const BASE_URI: Item<String> = Item::new("base_uri");

/// Number of tokens ever issued. Ids are dense and zero-based, so this
/// is also the next id to assign.
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");
// token id -> owner, set once at mint
pub const TOKENS: Map<u64, Addr> = Map::new("tokens");

/// Units minted per (wallet, stage). Whitelist and public tallies are
/// independent and never reset.
pub const MINT_COUNTS: Map<(&Addr, u8), u32> = Map::new("mint_counts");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wire_form_round_trips() {
        for value in 0u8..=2 {
            assert_eq!(Stage::from_u8(value).unwrap().as_u8(), value);
        }
        assert_eq!(Stage::from_u8(3), None);
        assert_eq!(Stage::from_u8(255), None);
    }
}
