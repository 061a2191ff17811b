//! Domain entities exposed by the browse service layer.

pub mod bid_notice;
pub mod order_plan;
pub mod types;
