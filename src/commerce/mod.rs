//! Storefront module
//!
//! Product catalog and the payment collaborator client.

pub mod payment;
pub mod products;

pub use payment::{PaymentClient, PaymentIntent};
pub use products::{format_price, Product, ProductCatalog, ProductInfo};
