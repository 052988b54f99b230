use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::status::OrderStatus;

/// One requested line of a new order, before pricing.
#[derive(Debug, Clone)]
pub struct LineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A line with the product's name and price snapshotted at creation time.
/// Later catalog changes never touch these values.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

/// Fully priced order ready to persist.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: Uuid,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub total: BigDecimal,
    pub lines: Vec<PricedLine>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

/// Courier summary joined into an order view when an assignment exists.
#[derive(Debug, Clone)]
pub struct DeliveryInfo {
    pub courier_id: Uuid,
    pub courier_name: String,
    pub courier_phone: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Aggregated read projection: order, items, and delivery data in one shape.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total: BigDecimal,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
    pub delivery: Option<DeliveryInfo>,
}
