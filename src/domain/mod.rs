mod field_errors;
mod new_subscriber;
pub mod source_data;
mod subscriber_email;
mod subscriber_name;

pub mod user;

pub use field_errors::FieldErrors;
pub use new_subscriber::{NewSubscriber, SubscriberParams};
pub use source_data::SourceData;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
