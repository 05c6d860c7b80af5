use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Balance sheet items that enter the net asset figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    #[serde(alias = "kassaBank")]
    pub cash_and_bank: Money,
    #[serde(default, alias = "forutbetaldaKostnader")]
    pub prepaid_expenses: Money,
    #[serde(default, alias = "ovrigaOmsattningstillgangar")]
    pub other_current_assets: Money,
    #[serde(default, alias = "banklan")]
    pub bank_loans: Money,
    #[serde(default, alias = "upplupenKostnader")]
    pub accrued_expenses: Money,
    #[serde(default, alias = "ovrigaKortfristigaSkulder")]
    pub other_current_liabilities: Money,
}

impl BalanceSheet {
    pub fn total_assets(&self) -> Money {
        self.cash_and_bank + self.prepaid_expenses + self.other_current_assets
    }

    pub fn total_liabilities(&self) -> Money {
        self.bank_loans + self.accrued_expenses + self.other_current_liabilities
    }
}

/// Assets minus liabilities, plus the value of rental units that could be sold
/// off as cooperative flats.
pub fn net_assets(balance_sheet: &BalanceSheet, convertible_asset_value: Money) -> Money {
    balance_sheet.total_assets() - balance_sheet.total_liabilities() + convertible_asset_value
}
