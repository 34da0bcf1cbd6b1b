pub mod browse;
pub mod list;
pub mod output;
pub mod show;

use clap::Subcommand;
use edmliveset::LiveSetClientImpl;

/// Output settings shared by every command
pub struct OutputOptions {
    pub json: bool,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the browse sections of the catalog
    Sections,

    /// Show the latest tracks of every section, or a window of one section
    ///
    /// Usage examples:
    /// # First tracks of every section
    /// edmliveset browse
    ///
    /// # Tracks 20-39 of the classic livesets
    /// edmliveset browse classic-livesets --offset 20 --limit 20
    Browse {
        /// Section identifier (see `edmliveset sections`)
        section: Option<String>,
    },

    /// List tracks of a category path
    ///
    /// Usage examples:
    /// edmliveset list /livesets-dj-mixes/ --limit 50
    List {
        /// Category path, e.g. /classic-livesets/
        path: String,
    },

    /// Search the catalog
    ///
    /// Usage examples:
    /// edmliveset search "armin van buuren" --limit 5
    Search {
        /// Search query
        query: String,
    },

    /// Show the full details of one track
    ///
    /// Accepts a track identifier (edmlive:/...) or any track page URL.
    Show {
        /// Track identifier or URL
        track: String,
    },

    /// Suggest tracks to play after the given one
    Radio {
        /// Track identifier or URL
        track: String,
    },
}

/// Execute the given command
pub async fn execute_command(
    command: Commands,
    client: &LiveSetClientImpl,
    options: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Sections => browse::handle_sections(client, options),
        Commands::Browse { section } => match section {
            Some(section) => browse::handle_section(client, &section, options).await,
            None => browse::handle_browse(client, options).await,
        },
        Commands::List { path } => list::handle_list(client, &path, options).await,
        Commands::Search { query } => list::handle_search(client, &query, options).await,
        Commands::Show { track } => show::handle_show(client, &track, options).await,
        Commands::Radio { track } => show::handle_radio(client, &track, options).await,
    }
}
