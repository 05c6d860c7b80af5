pub mod balance;
pub mod long_term;

pub use balance::{net_assets, BalanceSheet};
pub use long_term::{long_term_interest, long_term_result, per_area, IncomeStatement};
