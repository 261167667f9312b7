use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, QuerierWrapper, QueryRequest, StdResult, WasmMsg, WasmQuery,
};
use sg_std::CosmosMsg;

use crate::msg::{ExecuteMsg, QueryMsg};
use crate::state::Stage;

/// SimpleNftContract is a wrapper around Addr that provides helpers
/// for working with this contract from other contracts and tooling.
#[cw_serde]
pub struct SimpleNftContract(pub Addr);

impl SimpleNftContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn total_supply(&self, querier: &QuerierWrapper) -> StdResult<u64> {
        self.query(querier, QueryMsg::TotalSupply {})
    }

    pub fn stage(&self, querier: &QuerierWrapper) -> StdResult<Stage> {
        self.query(querier, QueryMsg::Stage {})
    }

    pub fn token_uri(&self, querier: &QuerierWrapper, token_id: u64) -> StdResult<String> {
        self.query(querier, QueryMsg::TokenUri { token_id })
    }

    fn query<T: serde::de::DeserializeOwned>(
        &self,
        querier: &QuerierWrapper,
        msg: QueryMsg,
    ) -> StdResult<T> {
        querier.query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: self.addr().into(),
            msg: to_binary(&msg)?,
        }))
    }
}
