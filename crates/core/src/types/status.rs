//! Status enums matching the commerce backend contract.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported by the commerce backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Cancelled,
}

/// Processing state of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_encoding() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "\"shipped\"");
        let status: OrderStatus = serde_json::from_str("\"cancelled\"").expect("deserialize");
        assert_eq!(status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_quote_status_snake_case() {
        let json = serde_json::to_string(&QuoteStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in_progress\"");
    }
}
