use crate::core::calculator::balance::{balance_qty, running_balance};
use crate::models::lenient;
use crate::models::record::{Record, require};
use crate::models::verification::VerificationStatus;
use crate::utils::colors::{RESET, color_for_balance};
use crate::utils::date::format_short;
use crate::utils::table::Column;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Packaging products tracked in the empty-bag ledger.
pub const PRODUCTS: &[&str] = &[
    "E- Urea",
    "E- DAP",
    "E- ZK Plus MOP",
    "E- ZK Khas MOP",
    "E- NP Plus",
    "E- Zabardast Urea",
    "E- Tripple super phosphat",
    "E- Zingro",
    "E- SOP Powder",
    "E- SOP Granular",
    "E- Zoran",
];

/// Canonical catalogue spelling for `input`, matched case-insensitively.
pub fn match_product(input: &str) -> Option<&'static str> {
    let wanted = input.trim().to_lowercase();
    PRODUCTS.iter().copied().find(|p| p.to_lowercase() == wanted)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmptyBagRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub product: String,
    #[serde(deserialize_with = "lenient::string")]
    pub opening_balance: String,
    #[serde(deserialize_with = "lenient::string")]
    pub receipt_qty: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issued_qty: String,
    #[serde(deserialize_with = "lenient::string")]
    pub issuence_purpose: String,
    #[serde(deserialize_with = "lenient::string")]
    pub per_ref: String,
    #[serde(deserialize_with = "lenient::string")]
    pub balance_qty: String,
    #[serde(deserialize_with = "lenient::string")]
    pub whi_initial: String,
    #[serde(deserialize_with = "lenient::string")]
    pub do_verified: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmptyBagRecord {
    /// Balance as a number, recomputed from the ledger inputs.
    pub fn balance(&self) -> f64 {
        running_balance(&self.opening_balance, &self.receipt_qty, &self.issued_qty)
    }
}

impl Record for EmptyBagRecord {
    const DERIVED_INPUTS: &'static [&'static str] = &["openingBalance", "receiptQty", "issuedQty"];

    fn recompute(&mut self, _baseline_minutes: i64) {
        self.balance_qty = balance_qty(&self.opening_balance, &self.receipt_qty, &self.issued_qty);
    }

    fn missing_fields(&self) -> Vec<String> {
        require(&[
            ("Date", self.date.as_str()),
            ("Product", self.product.as_str()),
            ("Opening Balance", self.opening_balance.as_str()),
            ("Receipt QTY", self.receipt_qty.as_str()),
            ("Issued QTY", self.issued_qty.as_str()),
            ("Issuence Purpose", self.issuence_purpose.as_str()),
            ("Per Ref", self.per_ref.as_str()),
            ("Balance QTY", self.balance_qty.as_str()),
            ("WHI Initial", self.whi_initial.as_str()),
        ])
    }

    fn verification(&self) -> Option<VerificationStatus> {
        Some(VerificationStatus::parse(&self.do_verified))
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ID", 24),
            Column::new("Date", 12),
            Column::new("Product", 18),
            Column::new("Opening", 8),
            Column::new("Receipt", 8),
            Column::new("Issued", 8),
            Column::new("Balance", 8),
            Column::new("Purpose", 18),
            Column::new("Ref", 10),
            Column::new("WHI", 12),
            Column::new("DO", 16),
        ]
    }

    fn row(&self) -> Vec<String> {
        let balance = self.balance();
        vec![
            self.id.clone().unwrap_or_default(),
            format_short(&self.date),
            self.product.clone(),
            self.opening_balance.clone(),
            self.receipt_qty.clone(),
            self.issued_qty.clone(),
            format!("{}{}{}", color_for_balance(balance), self.balance_qty, RESET),
            self.issuence_purpose.clone(),
            self.per_ref.clone(),
            self.whi_initial.clone(),
            VerificationStatus::parse(&self.do_verified).colored(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_api_fields_recompute_to_string_balance() {
        let mut rec: EmptyBagRecord = serde_json::from_str(
            r#"{"product":"E- DAP","openingBalance":10,"receiptQty":"0","issuedQty":15,"balanceQty":999}"#,
        )
        .unwrap();
        rec.recompute(480);
        assert_eq!(rec.balance_qty, "-5");
        assert_eq!(rec.balance(), -5.0);
    }

    #[test]
    fn product_lookup_is_case_insensitive() {
        assert_eq!(match_product("e- dap"), Some("E- DAP"));
        assert_eq!(match_product(" E- Zoran "), Some("E- Zoran"));
        assert_eq!(match_product("Gold"), None);
    }
}
