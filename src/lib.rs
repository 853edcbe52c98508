pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerProvider, FieldRepository, InteractionRepository, LegacyRelayRequest,
    LegacyRelayUseCase, ListInteractionsUseCase, ListProvidersUseCase, ProviderDirectory,
    RecordInteractionUseCase, RelayMessageUseCase,
};

pub use cli::{Commands, FieldAction};

pub use connector::api::{Container, ContainerConfig, Router};
pub use connector::http_api::RelayHttpServer;
pub use connector::{
    DuckdbFieldRepository, DuckdbInteractionRepository, HttpAnswerProvider, MockAnswerProvider,
};

pub use domain::{
    compute_provider_hash, select_by_hash, ContentField, Context, DomainError, History,
    HistoryTurn, Interaction, NewInteraction, Provider, ProviderAnswer, ProviderRequest,
    RelayOutcome, RelayRequest,
};
