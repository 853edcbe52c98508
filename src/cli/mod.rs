use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the relay over HTTP
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Require `Authorization: Bearer <TOKEN>` on every request (falls back to RELAY_API_TOKEN)
        #[arg(long)]
        api_token: Option<String>,
    },

    /// Relay one query through a content field and record the interaction
    Send {
        query: String,

        #[arg(short, long)]
        field_id: i64,

        /// Interaction the query follows up on
        #[arg(short, long)]
        parent_rid: Option<i64>,

        #[arg(short, long, default_value = "0")]
        user_id: i64,
    },

    /// List the providers offered by the answer-provider service
    Providers,

    /// Manage content field configuration
    Field {
        #[command(subcommand)]
        action: FieldAction,
    },

    /// Store the serialized history for a field record
    History {
        field_id: i64,

        record_id: i64,

        /// JSON array of prior turns
        content: String,
    },

    /// List interactions recorded for a content item
    Interactions {
        data_id: i64,
    },

    Stats,
}

#[derive(Subcommand)]
pub enum FieldAction {
    Set {
        id: i64,

        #[arg(long)]
        data_id: i64,

        #[arg(long)]
        provider: String,

        #[arg(long, default_value = "")]
        system_prompt: String,
    },

    List,
}
