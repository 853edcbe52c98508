pub mod field_controller;
pub mod interactions_controller;
pub mod providers_controller;
pub mod send_controller;
pub mod stats_controller;

pub use field_controller::FieldController;
pub use interactions_controller::InteractionsController;
pub use providers_controller::ProvidersController;
pub use send_controller::SendController;
pub use stats_controller::StatsController;
