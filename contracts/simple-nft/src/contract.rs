use crate::state::{
    MintParams, Stage, ADMIN, BASE_URI, MERKLE_ROOT, MINT_COUNTS, PUBLIC_PARAMS, STAGE,
    TOKENS, TOKEN_COUNT, WHITELIST_PARAMS,
};
#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_binary, Addr, BankMsg, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo,
    StdError, StdResult, Storage, Uint128,
};
use cw2::set_contract_version;
use cw_utils::{may_pay, maybe_addr, nonpayable};
use semver::Version;
use sg_std::{Response, NATIVE_DENOM};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:simple-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = msg
        .owner
        .map_or_else(|| Ok(info.sender.clone()), |o| deps.api.addr_validate(&o))?;
    ADMIN.set(deps.branch(), Some(owner.clone()))?;

    STAGE.save(deps.storage, &Stage::Closed)?;
    WHITELIST_PARAMS.save(deps.storage, &msg.whitelist_params.unwrap_or_default())?;
    PUBLIC_PARAMS.save(deps.storage, &msg.public_params.unwrap_or_default())?;
    BASE_URI.save(deps.storage, &String::new())?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetBaseUri { base_uri } => execute_set_base_uri(deps, info, base_uri),
        ExecuteMsg::SetMerkleRoot { root } => execute_set_merkle_root(deps, info, root),
        ExecuteMsg::SetStage { stage } => execute_set_stage(deps, info, stage),
        ExecuteMsg::SetWhitelistMintParams {
            price,
            max_per_wallet,
        } => execute_set_mint_params(deps, info, Stage::Whitelist, price, max_per_wallet),
        ExecuteMsg::SetPublicMintParams {
            price,
            max_per_wallet,
        } => execute_set_mint_params(deps, info, Stage::Public, price, max_per_wallet),
        ExecuteMsg::DevMint { to, quantity } => execute_dev_mint(deps, info, to, quantity),
        ExecuteMsg::WhitelistMint { quantity, proof } => {
            execute_whitelist_mint(deps, info, quantity, proof)
        }
        ExecuteMsg::PublicMint { quantity } => execute_public_mint(deps, info, quantity),
        ExecuteMsg::Withdraw { to } => execute_withdraw(deps, env, info, to),
        ExecuteMsg::UpdateOwner { owner } => execute_update_owner(deps, info, owner),
    }
}

/// The owner capability check shared by every privileged entry point,
/// evaluated before any other validation.
fn assert_owner(deps: Deps, caller: &Addr) -> Result<(), ContractError> {
    ADMIN
        .assert_admin(deps, caller)
        .map_err(|_| ContractError::Unauthorized {})
}

pub fn execute_set_base_uri(
    deps: DepsMut,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    // no well-formedness validation, an empty string unsets the base
    BASE_URI.save(deps.storage, &base_uri)?;

    let event = Event::new("set-base-uri")
        .add_attribute("base_uri", base_uri)
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_merkle_root(
    deps: DepsMut,
    info: MessageInfo,
    root: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    // Stored verbatim. A root that is not 32 bytes of hex is accepted
    // here and fails every proof at verify time instead.
    MERKLE_ROOT.save(deps.storage, &root)?;

    let event = Event::new("set-merkle-root")
        .add_attribute("root", root)
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_stage(
    deps: DepsMut,
    info: MessageInfo,
    stage: u8,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    // any stage may go to any other stage, self-loops included
    let stage = Stage::from_u8(stage).ok_or(ContractError::InvalidStage { stage })?;
    STAGE.save(deps.storage, &stage)?;

    let event = Event::new("set-stage")
        .add_attribute("stage", stage.as_u8().to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_set_mint_params(
    deps: DepsMut,
    info: MessageInfo,
    stage: Stage,
    price: Uint128,
    max_per_wallet: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let params = MintParams {
        price,
        max_per_wallet,
    };
    let item = match stage {
        Stage::Whitelist => &WHITELIST_PARAMS,
        _ => &PUBLIC_PARAMS,
    };
    item.save(deps.storage, &params)?;

    let event = Event::new("set-mint-params")
        .add_attribute("stage", stage.as_u8().to_string())
        .add_attribute("price", price)
        .add_attribute("max_per_wallet", max_per_wallet.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_dev_mint(
    deps: DepsMut,
    info: MessageInfo,
    to: String,
    quantity: u32,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let to = deps.api.addr_validate(&to)?;
    let (first, last) = issue_tokens(deps.storage, &to, quantity)?;

    let event = Event::new("dev-mint")
        .add_attribute("recipient", to)
        .add_attribute("first_token_id", first.to_string())
        .add_attribute("last_token_id", last.to_string())
        .add_attribute("sender", info.sender);
    Ok(Response::new().add_event(event))
}

pub fn execute_whitelist_mint(
    deps: DepsMut,
    info: MessageInfo,
    quantity: u32,
    proof: Vec<String>,
) -> Result<Response, ContractError> {
    let stage = STAGE.load(deps.storage)?;
    ensure!(stage == Stage::Whitelist, ContractError::WrongStage {});

    let root = MERKLE_ROOT.may_load(deps.storage)?.unwrap_or_default();
    ensure!(
        merkle_proof::verify(&root, info.sender.as_str(), &proof),
        ContractError::NotAllowlisted {}
    );

    let params = WHITELIST_PARAMS.load(deps.storage)?;
    paid_mint(deps, info, stage, &params, quantity)
}

pub fn execute_public_mint(
    deps: DepsMut,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    let stage = STAGE.load(deps.storage)?;
    ensure!(stage == Stage::Public, ContractError::WrongStage {});

    let params = PUBLIC_PARAMS.load(deps.storage)?;
    paid_mint(deps, info, stage, &params, quantity)
}

/// Cap and payment checks shared by both paid phases, then issuance.
/// Overpayment is kept; there is no refund path.
fn paid_mint(
    deps: DepsMut,
    info: MessageInfo,
    stage: Stage,
    params: &MintParams,
    quantity: u32,
) -> Result<Response, ContractError> {
    let tally_key = (&info.sender, stage.as_u8());
    let minted = MINT_COUNTS.may_load(deps.storage, tally_key)?.unwrap_or_default();
    let new_count = minted
        .checked_add(quantity)
        .filter(|count| *count <= params.max_per_wallet)
        .ok_or(ContractError::CapExceeded {
            limit: params.max_per_wallet,
        })?;

    let need = params
        .price
        .checked_mul(Uint128::from(quantity))
        .map_err(StdError::overflow)?;
    let sent = may_pay(&info, NATIVE_DENOM)?;
    ensure!(
        sent >= need,
        ContractError::InsufficientPayment { sent, need }
    );

    MINT_COUNTS.save(deps.storage, tally_key, &new_count)?;
    let (first, last) = issue_tokens(deps.storage, &info.sender, quantity)?;

    let event = Event::new("mint")
        .add_attribute("stage", stage.as_u8().to_string())
        .add_attribute("recipient", info.sender.clone())
        .add_attribute("first_token_id", first.to_string())
        .add_attribute("last_token_id", last.to_string())
        .add_attribute("payment", sent);
    Ok(Response::new().add_event(event))
}

/// Assign `quantity` consecutive ids starting at the current supply
/// and record their owner. Ids are never reused or renumbered.
fn issue_tokens(
    storage: &mut dyn Storage,
    to: &Addr,
    quantity: u32,
) -> Result<(u64, u64), ContractError> {
    ensure!(quantity > 0, ContractError::ZeroQuantity {});

    let first = TOKEN_COUNT.load(storage)?;
    let next = first + quantity as u64;
    for token_id in first..next {
        TOKENS.save(storage, token_id, to)?;
    }
    TOKEN_COUNT.save(storage, &next)?;

    Ok((first, next - 1))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let to = deps.api.addr_validate(&to)?;
    let balance = deps
        .querier
        .query_balance(env.contract.address, NATIVE_DENOM)?;

    let mut res = Response::new();
    // nothing to send on a zero balance, but the call still succeeds
    if !balance.amount.is_zero() {
        res = res.add_message(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![balance.clone()],
        });
    }

    let event = Event::new("withdraw")
        .add_attribute("recipient", to)
        .add_attribute("amount", balance.amount)
        .add_attribute("sender", info.sender);
    Ok(res.add_event(event))
}

pub fn execute_update_owner(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let owner = maybe_addr(deps.api, owner)?;
    Ok(ADMIN.execute_update_admin(deps, info, owner)?)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TotalSupply {} => to_binary(&TOKEN_COUNT.load(deps.storage)?),
        QueryMsg::Stage {} => to_binary(&STAGE.load(deps.storage)?),
        QueryMsg::TokenUri { token_id } => to_binary(&query_token_uri(deps, token_id)?),
        QueryMsg::OwnerOf { token_id } => to_binary(&TOKENS.load(deps.storage, token_id)?),
        QueryMsg::BaseUri {} => to_binary(&BASE_URI.load(deps.storage)?),
        QueryMsg::MerkleRoot {} => to_binary(&MERKLE_ROOT.may_load(deps.storage)?),
        QueryMsg::WhitelistMintParams {} => to_binary(&WHITELIST_PARAMS.load(deps.storage)?),
        QueryMsg::PublicMintParams {} => to_binary(&PUBLIC_PARAMS.load(deps.storage)?),
        QueryMsg::MintCount { address, stage } => {
            to_binary(&query_mint_count(deps, address, stage)?)
        }
        QueryMsg::Owner {} => to_binary(&ADMIN.query_admin(deps)?),
    }
}

pub fn query_token_uri(deps: Deps, token_id: u64) -> StdResult<String> {
    let supply = TOKEN_COUNT.load(deps.storage)?;
    if token_id >= supply {
        return Err(StdError::not_found(format!("token {token_id}")));
    }

    let base_uri = BASE_URI.load(deps.storage)?;
    if base_uri.is_empty() {
        // placeholder until the owner sets a base; reads never fail
        // for a minted id
        return Ok(String::new());
    }
    Ok(format!("{base_uri}{token_id}"))
}

pub fn query_mint_count(deps: Deps, address: String, stage: u8) -> StdResult<u32> {
    let addr = deps.api.addr_validate(&address)?;
    let stage =
        Stage::from_u8(stage).ok_or_else(|| StdError::generic_err("invalid stage"))?;
    Ok(MINT_COUNTS
        .may_load(deps.storage, (&addr, stage.as_u8()))?
        .unwrap_or_default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    // set new contract version
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
