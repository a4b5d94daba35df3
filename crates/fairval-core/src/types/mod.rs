//! Core domain types.

mod cashflow;
mod currency;
mod date;
mod frequency;

pub use cashflow::{CashFlowEvent, FlowStatus, FlowType};
pub use currency::Currency;
pub use date::Date;
pub use frequency::Frequency;
