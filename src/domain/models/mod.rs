mod content_field;
mod history;
mod interaction;
mod provider;
mod relay;

pub use content_field::*;
pub use history::*;
pub use interaction::*;
pub use provider::*;
pub use relay::*;
