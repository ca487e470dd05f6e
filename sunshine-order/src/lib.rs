pub mod cart;
pub mod models;
pub mod checkout;
pub mod fulfillment;

pub use cart::Cart;
pub use models::{CheckoutStep, ContactDetails, Order, PaymentDetails};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutSummary};
pub use fulfillment::{QrPayload, Receipt};
