// Bookhive - Social Book Catalog
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use anyhow::Result;
use bookhive_core::catalog::{CatalogService, EngagementOp};
use bookhive_core::config::CatalogConfig;
use bookhive_core::storage::models::{EngagementKind, NewUser};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookhive-cli")]
#[command(about = "Bookhive CLI - Catalog maintenance tool", long_about = None)]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the bundled dataset into an empty catalog
    Seed,
    /// List the catalog, optionally filtered by title
    List {
        /// Title substring to search for
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Show one book by id
    Show {
        /// Book id (UUID)
        id: String,
    },
    /// Show the trending list
    Trending,
    /// Add an engagement edge (favorite, read, reading)
    Mark {
        /// Edge kind: favorite, read or reading
        kind: EngagementKindArg,
        /// Book id (UUID)
        book_id: String,
        /// User id (UUID)
        user_id: String,
    },
    /// Remove an engagement edge
    Unmark {
        kind: EngagementKindArg,
        book_id: String,
        user_id: String,
    },
    /// Create a user record
    AddUser {
        username: String,
        email: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EngagementKindArg {
    Favorite,
    Read,
    Reading,
}

impl From<EngagementKindArg> for EngagementKind {
    fn from(arg: EngagementKindArg) -> Self {
        match arg {
            EngagementKindArg::Favorite => EngagementKind::Favorite,
            EngagementKindArg::Read => EngagementKind::Read,
            EngagementKindArg::Reading => EngagementKind::Reading,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = CatalogConfig {
        database_path: cli.database.clone(),
        ..Default::default()
    };
    let service = CatalogService::open(config).await?;

    match cli.command {
        Commands::Seed => {
            let seeded = service.bootstrap().await?;
            if seeded == 0 {
                println!("Catalog already populated, nothing to do");
            } else {
                println!("Seeded {} books", seeded);
            }
        }
        Commands::List { title } => {
            let books = service.list_books(title.as_deref()).await?;
            if books.is_empty() {
                println!("No books found");
            }
            for book in books {
                println!(
                    "{}  {} ({}) - {}",
                    book.book_id,
                    book.title,
                    book.published_date,
                    book.authors().join(", ")
                );
            }
        }
        Commands::Show { id } => {
            let book = service.get_book_by_id(&id).await?;
            println!("{}", book.title);
            println!("  Published: {} by {}", book.published_date, book.publisher);
            println!("  Authors:   {}", book.authors().join(", "));
            println!("  Genres:    {}", book.genres().join(", "));
            println!("  Pages:     {}", book.pages);
            println!("  Rating:    {:.1}", book.average_rating);
            if let Some(identifier) = &book.identifier {
                println!("  Identifier: {}", identifier);
            }
        }
        Commands::Trending => {
            for (position, entry) in service.trending().await?.iter().enumerate() {
                println!(
                    "{:>2}. {:>6.1}  {}  ({} fav / {} read / {} reading)",
                    position + 1,
                    entry.score,
                    entry.book.title,
                    entry.signals.favorite_count,
                    entry.signals.read_count,
                    entry.signals.reading_count,
                );
            }
        }
        Commands::Mark {
            kind,
            book_id,
            user_id,
        } => {
            let book = service
                .mutate_engagement(kind.into(), &book_id, &user_id, EngagementOp::Add)
                .await?;
            println!("Marked '{}' as {}", book.title, EngagementKind::from(kind));
        }
        Commands::Unmark {
            kind,
            book_id,
            user_id,
        } => {
            let book = service
                .mutate_engagement(kind.into(), &book_id, &user_id, EngagementOp::Remove)
                .await?;
            println!("Unmarked '{}' as {}", book.title, EngagementKind::from(kind));
        }
        Commands::AddUser { username, email } => {
            let user = service.create_user(NewUser::new(username, email)).await?;
            println!("Created user {} ({})", user.username, user.user_id);
        }
    }

    Ok(())
}
