//! Running balance of the empty-bag ledger.

use crate::utils::formatting::format_quantity;
use crate::utils::number::float_or_zero;

/// `(opening + receipt) - issued`. Empty or unparsable inputs count as 0 and
/// negative results are returned as-is.
pub fn running_balance(opening: &str, receipt: &str, issued: &str) -> f64 {
    let opening = float_or_zero(opening);
    let receipt = float_or_zero(receipt);
    let issued = float_or_zero(issued);
    (opening + receipt) - issued
}

/// [`running_balance`] rendered for the `balanceQty` field.
pub fn balance_qty(opening: &str, receipt: &str, issued: &str) -> String {
    format_quantity(running_balance(opening, receipt, issued))
}
