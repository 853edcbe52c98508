use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{
    FieldController, InteractionsController, ProvidersController, SendController, StatsController,
};

pub struct Router<'a> {
    send_controller: SendController<'a>,
    providers_controller: ProvidersController<'a>,
    field_controller: FieldController<'a>,
    interactions_controller: InteractionsController<'a>,
    stats_controller: StatsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            send_controller: SendController::new(container),
            providers_controller: ProvidersController::new(container),
            field_controller: FieldController::new(container),
            interactions_controller: InteractionsController::new(container),
            stats_controller: StatsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Send {
                query,
                field_id,
                parent_rid,
                user_id,
            } => {
                self.send_controller
                    .send(query, field_id, parent_rid, user_id)
                    .await
            }
            Commands::Providers => self.providers_controller.list().await,
            Commands::Field { action } => self.field_controller.field(action).await,
            Commands::History {
                field_id,
                record_id,
                content,
            } => {
                self.field_controller
                    .history(field_id, record_id, content)
                    .await
            }
            Commands::Interactions { data_id } => self.interactions_controller.list(data_id).await,
            Commands::Stats => self.stats_controller.stats().await,
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
