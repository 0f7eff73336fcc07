//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod user;

// Catalog
pub mod product;

// Checkout
pub mod address;
pub mod cart;
pub mod order;

// Notifications
pub mod subscription;

// Re-exports
pub use address::{Address, AddressCreate, AddressUpdate};
pub use cart::{CartItem, CartItemCreate, CartItemFull, CartItemUpdate};
pub use order::{
    NewOrder, Order, OrderStatus, PAYMENT_STATUS_COD, ProductSnapshot, sort_for_admin,
};
pub use product::{Product, ProductCreate, ProductId, ProductUpdate};
pub use subscription::{PushSubscription, SubscriptionCreate, SubscriptionKeys};
pub use user::{NewUser, Role, User, UserCreate, UserInfo};
