//! Investment flow for a single product.

pub mod flow;

pub use flow::{
    Confirmation, InvestFlow, InvestStep, InvestmentReceipt, PRESET_AMOUNTS, Retreat, STEP,
};
