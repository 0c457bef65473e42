use clap::{Parser, Subcommand};
use std::process::ExitCode;

use pickaihub::commands::{
    cmd_categories, cmd_count, cmd_fav_add, cmd_fav_ls, cmd_fav_rm, cmd_featured, cmd_ls,
    cmd_related, cmd_search, cmd_show,
};
use pickaihub::types::{SortMode, VALID_SORTS};

#[derive(Parser)]
#[command(name = "pickaihub")]
#[command(about = "Browse the PickAIHub AI tool catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog tools
    #[command(visible_alias = "l")]
    Ls {
        /// Category id or free-text search (same rules as the site URL)
        query: Option<String>,

        /// Sort: recommended, newest, popular
        #[arg(short, long, default_value = "recommended", value_parser = parse_sort)]
        sort: SortMode,

        /// Number of pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fuzzy-search fetched tools locally
    Search {
        /// Search text (typo-tolerant)
        query: String,

        /// Restrict to a category before searching
        #[arg(short, long)]
        category: Option<String>,

        /// Number of pages to fetch before filtering
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single tool by id or name
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List trending tools
    Featured {
        #[arg(short, long, default_value_t = 3)]
        limit: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tools related to one listing
    Related {
        id: String,

        #[arg(short, long, default_value_t = 3)]
        limit: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-category tool counts
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the total number of listed tools
    Count,

    /// Manage favorites (requires auth)
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
}

#[derive(Subcommand)]
enum FavAction {
    /// List favorites
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a tool to favorites
    Add { id: String },
    /// Remove a tool from favorites
    Rm { id: String },
}

fn parse_sort(s: &str) -> Result<SortMode, String> {
    s.parse()
        .map_err(|_| format!("valid sorts are: {}", VALID_SORTS.join(", ")))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ls {
            query,
            sort,
            pages,
            json,
        } => cmd_ls(query.as_deref(), sort, pages.max(1), json).await,
        Commands::Search {
            query,
            category,
            pages,
            json,
        } => cmd_search(&query, category.as_deref(), pages.max(1), json).await,
        Commands::Show { id, json } => cmd_show(&id, json).await,
        Commands::Featured { limit, json } => cmd_featured(limit, json).await,
        Commands::Related { id, limit, json } => cmd_related(&id, limit, json).await,
        Commands::Categories { json } => cmd_categories(json).await,
        Commands::Count => cmd_count().await,
        Commands::Fav { action } => match action {
            FavAction::Ls { json } => cmd_fav_ls(json).await,
            FavAction::Add { id } => cmd_fav_add(&id).await,
            FavAction::Rm { id } => cmd_fav_rm(&id).await,
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
