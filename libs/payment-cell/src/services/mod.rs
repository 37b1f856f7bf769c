pub mod stripe;

pub use stripe::{PaymentProcessor, StripeClient};
