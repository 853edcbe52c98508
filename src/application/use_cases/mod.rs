mod legacy_relay;
mod list_interactions;
mod list_providers;
mod record_interaction;
mod relay_message;

pub use legacy_relay::*;
pub use list_interactions::*;
pub use list_providers::*;
pub use record_interaction::*;
pub use relay_message::*;
