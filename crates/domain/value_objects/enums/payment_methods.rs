use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Net Banking")]
    NetBanking,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cheque => "Cheque",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Cash" => Some(PaymentMethod::Cash),
            "Credit Card" => Some(PaymentMethod::CreditCard),
            "Debit Card" => Some(PaymentMethod::DebitCard),
            "UPI" => Some(PaymentMethod::Upi),
            "Net Banking" => Some(PaymentMethod::NetBanking),
            "Bank Transfer" => Some(PaymentMethod::BankTransfer),
            "Cheque" => Some(PaymentMethod::Cheque),
            _ => None,
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_stored_names() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Upi,
            PaymentMethod::NetBanking,
            PaymentMethod::BankTransfer,
            PaymentMethod::Cheque,
        ] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            assert_eq!(PaymentMethod::from_str(method.as_str()), Some(method));
        }
    }
}
