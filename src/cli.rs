use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the catalog interactively
    Browse {
        /// Use OpenAI embeddings for search and similarity queries
        #[clap(long, default_value = "false")]
        openai: bool,
    },

    /// List catalog products
    List {
        /// Page size
        #[clap(short, long)]
        limit: Option<usize>,

        /// Offset into the catalog
        #[clap(short, long, default_value = "0")]
        skip: usize,

        /// Gender filter (empty = unset)
        #[clap(short, long, default_value = "")]
        gender: String,

        /// Category filter (empty = unset)
        #[clap(short, long, default_value = "")]
        category: String,

        /// Render a card grid instead of JSON
        #[clap(long, default_value = "false")]
        grid: bool,
    },

    /// Search products by free text
    Search {
        text: String,

        /// Use the v0 text-match endpoint instead of semantic search
        #[clap(long, default_value = "false")]
        v0: bool,

        /// Use OpenAI embeddings
        #[clap(long, default_value = "false")]
        openai: bool,

        /// Number of results
        #[clap(short, long)]
        limit: Option<usize>,

        /// Gender filter (ignored by --v0)
        #[clap(short, long, default_value = "")]
        gender: String,

        /// Category filter (ignored by --v0)
        #[clap(short, long, default_value = "")]
        category: String,

        /// Render a card grid instead of JSON
        #[clap(long, default_value = "false")]
        grid: bool,
    },

    /// Find products similar to a given product
    Similar {
        /// Product id
        id: u64,

        /// Compare image vectors instead of text vectors
        #[clap(long, default_value = "false")]
        image: bool,

        /// Use OpenAI embeddings
        #[clap(long, default_value = "false")]
        openai: bool,

        /// Number of results
        #[clap(short, long)]
        limit: Option<usize>,

        /// Gender filter
        #[clap(short, long, default_value = "")]
        gender: String,

        /// Category filter
        #[clap(short, long, default_value = "")]
        category: String,

        /// Render a card grid instead of JSON
        #[clap(long, default_value = "false")]
        grid: bool,
    },

    /// Manage the stored auth token
    Token {
        #[clap(subcommand)]
        action: TokenArgs,
    },

    /// Print the resolved configuration
    Config {},
}

#[derive(Subcommand, Debug, Clone)]
pub enum TokenArgs {
    /// Store a token
    Set { token: String },

    /// Print the resolved token, masked
    Show {},

    /// Delete the stored token
    Clear {},
}
