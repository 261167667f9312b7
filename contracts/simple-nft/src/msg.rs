use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw_controllers::AdminResponse;

use crate::state::{MintParams, Stage};

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the sender
    pub owner: Option<String>,
    pub whitelist_params: Option<MintParams>,
    pub public_params: Option<MintParams>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Owner. Replace the metadata base URI unconditionally.
    SetBaseUri { base_uri: String },
    /// Owner. Replace the allowlist commitment. The root is stored
    /// as-is; validity only matters at proof verification time.
    SetMerkleRoot { root: String },
    /// Owner. 0 = closed, 1 = whitelist, 2 = public.
    SetStage { stage: u8 },
    /// Owner. Overwrite whitelist-phase price and per-wallet cap.
    SetWhitelistMintParams { price: Uint128, max_per_wallet: u32 },
    /// Owner. Overwrite public-phase price and per-wallet cap.
    SetPublicMintParams { price: Uint128, max_per_wallet: u32 },
    /// Owner. Reserved allocation, bypasses stage, price and cap.
    DevMint { to: String, quantity: u32 },
    /// Payable. Mint during the whitelist stage with a membership proof.
    WhitelistMint { quantity: u32, proof: Vec<String> },
    /// Payable. Mint during the public stage.
    PublicMint { quantity: u32 },
    /// Owner. Send the whole contract balance to `to`.
    Withdraw { to: String },
    /// Owner. Hand over (or renounce) ownership.
    UpdateOwner { owner: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(u64)]
    TotalSupply {},
    #[returns(Stage)]
    Stage {},
    /// Base URI + decimal token id; errors if the id was never minted
    #[returns(String)]
    TokenUri { token_id: u64 },
    #[returns(Addr)]
    OwnerOf { token_id: u64 },
    #[returns(String)]
    BaseUri {},
    #[returns(Option<String>)]
    MerkleRoot {},
    #[returns(MintParams)]
    WhitelistMintParams {},
    #[returns(MintParams)]
    PublicMintParams {},
    /// Units minted by `address` during `stage` (0/1/2)
    #[returns(u32)]
    MintCount { address: String, stage: u8 },
    #[returns(AdminResponse)]
    Owner {},
}
