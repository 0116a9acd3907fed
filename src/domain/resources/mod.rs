//! Typed Stripe resources returned by the route facades.

mod checkout;
mod customer;
mod event;
mod invoice;
mod payment_source;
mod portal;
mod subscription;

pub use checkout::{CheckoutMode, CheckoutSession};
pub use customer::Customer;
pub use event::{Event, EventData, EventRequest};
pub use invoice::{Invoice, InvoiceStatus};
pub use payment_source::{BankAccount, Card};
pub use portal::PortalSession;
pub use subscription::{
    Price, Product, Recurring, Subscription, SubscriptionItem, SubscriptionStatus,
};
