//! Background services
//!
//! Notification fan-out (email + web push) running off the request
//! path.

pub mod email;
pub mod notifier;
pub mod push;

pub use email::{EmailClient, EmailSender};
pub use notifier::{Notifier, NotifierEvent, NotifierService, OrderLine, OrderPlaced};
pub use push::{PushError, PushGateway, VapidConfig, WebPushGateway};
