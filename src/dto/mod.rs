//! DTO modules that bridge services with templates.

pub mod bid_notice;
pub mod order_plans;
