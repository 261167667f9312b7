use cosmwasm_std::{StdError, Uint128};
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("WrongStage")]
    WrongStage {},

    #[error("InvalidStage: {stage}")]
    InvalidStage { stage: u8 },

    #[error("NotAllowlisted")]
    NotAllowlisted {},

    #[error("CapExceeded: per-wallet limit is {limit}")]
    CapExceeded { limit: u32 },

    #[error("InsufficientPayment: sent {sent}, need {need}")]
    InsufficientPayment { sent: Uint128, need: Uint128 },

    #[error("ZeroQuantity")]
    ZeroQuantity {},
}
