//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for photos using the `clap` crate.
//! Every invocation is one session: the data file is loaded, the command runs
//! as the logged-in user (or `--user`), and the data file is saved again if the
//! command changed anything.
//!
//! # Commands
//!
//! - **login / logout / whoami**: choose the acting user
//! - **user**: manage accounts (admin only)
//! - **album**: create, rename, delete and inspect albums
//! - **photo**: add, remove, copy, move and caption photos
//! - **tag / tagtype**: attach tags and manage tag types
//! - **search**: find photos by tag and capture date
//! - **slideshow**: step through an album
//!
//! # Examples
//!
//! ```
//! use photos::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["photos", "album", "create", "trip"]);
//! assert!(cli.command.mutates());
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Search mode for combining multiple tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Match ANY of the tags (OR logic)
    Any,
    /// Match ALL of the tags (AND logic)
    All,
}

/// Parameters for the search command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// `type=value` tag specs
    pub tags: Vec<String>,
    /// How to combine multiple tags
    pub mode: SearchMode,
    /// Exclusive lower bound on capture time
    pub from: Option<NaiveDateTime>,
    /// Exclusive upper bound on capture time
    pub to: Option<NaiveDateTime>,
    /// Album to create from the results
    pub save_as: Option<String>,
}

impl SearchParams {
    /// Whether any criterion was given
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        !self.tags.is_empty() || self.from.is_some() || self.to.is_some()
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM:SS`
///
/// # Errors
///
/// Returns a message naming the accepted formats.
pub fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid date '{s}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)"))
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true, format=json)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (quiet, format, data_file)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Account management subcommands (admin only)
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// List all users
    #[command(visible_alias = "ls")]
    List,

    /// Create a user
    Add {
        /// Username
        name: String,
    },

    /// Delete a user and all of their albums
    #[command(visible_alias = "rm")]
    Delete {
        /// Username
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Album subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AlbumCommands {
    /// List albums with photo counts and date ranges
    #[command(visible_alias = "ls")]
    List,

    /// Create an empty album
    Create {
        /// Album name
        name: String,
    },

    /// Delete an album; its photos stay in other albums
    #[command(visible_alias = "rm")]
    Delete {
        /// Album name
        name: String,

        /// Skip confirmation prompt for non-empty albums
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Rename an album
    #[command(visible_alias = "mv")]
    Rename {
        /// Current name of the album
        old_name: String,

        /// New name for the album
        new_name: String,
    },

    /// Show the photos in an album
    Show {
        /// Album name
        name: String,
    },
}

/// Photo subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PhotoCommands {
    /// Add photo files to an album
    Add {
        /// Target album
        album: String,

        /// Photo files or glob patterns (e.g. "~/Pictures/*.jpg")
        #[arg(value_name = "PATH", required = true, num_args = 1..)]
        paths: Vec<String>,
    },

    /// Remove a photo from an album
    #[command(visible_alias = "rm")]
    Remove {
        /// Album to remove from
        album: String,

        /// Photo path
        path: String,
    },

    /// Add a photo from one album to another
    #[command(visible_alias = "cp")]
    Copy {
        /// Photo path
        path: String,

        /// Source album
        #[arg(long = "from")]
        from: String,

        /// Target album
        #[arg(long = "to")]
        to: String,
    },

    /// Move a photo from one album to another
    #[command(visible_alias = "mv")]
    Move {
        /// Photo path
        path: String,

        /// Source album
        #[arg(long = "from")]
        from: String,

        /// Target album
        #[arg(long = "to")]
        to: String,
    },

    /// Set a photo's caption
    Caption {
        /// Photo path
        path: String,

        /// New caption (empty to clear)
        caption: String,
    },

    /// Show a photo's details
    Show {
        /// Photo path
        path: String,
    },
}

/// Tag subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommands {
    /// Attach a tag to a photo
    Add {
        /// Photo path
        path: String,

        /// Tag as type=value (e.g. location=paris)
        #[arg(value_name = "TYPE=VALUE")]
        tag: String,
    },

    /// Detach a tag from a photo
    #[command(visible_alias = "rm")]
    Remove {
        /// Photo path
        path: String,

        /// Tag as type=value
        #[arg(value_name = "TYPE=VALUE")]
        tag: String,
    },
}

/// Tag type subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TagTypeCommands {
    /// List tag types
    #[command(visible_alias = "ls")]
    List,

    /// Define a new tag type
    Add {
        /// Tag type name
        name: String,

        /// Allow several values per photo (like people)
        #[arg(short = 'm', long = "multi")]
        multi: bool,
    },

    /// Remove a tag type and every tag of that type
    #[command(visible_alias = "rm")]
    Remove {
        /// Tag type name
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "photos")]
#[command(about = "A photo organizer: albums, tags, searches and slideshows", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Act as this user instead of the logged-in one
    #[arg(short = 'u', long = "user", value_name = "USER", global = true)]
    pub user: Option<String>,

    /// Data file to use (overrides config)
    #[arg(long = "data", value_name = "FILE", global = true)]
    pub data: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Remember a user for later commands (use "admin" to manage accounts)
    Login {
        /// Username
        name: String,
    },

    /// Forget the remembered user
    Logout,

    /// Print the acting user
    Whoami,

    /// Manage user accounts (admin only)
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage albums
    #[command(visible_alias = "a")]
    Album {
        #[command(subcommand)]
        command: AlbumCommands,
    },

    /// Manage photos within albums
    #[command(visible_alias = "p")]
    Photo {
        #[command(subcommand)]
        command: PhotoCommands,
    },

    /// Attach or detach tags
    #[command(visible_alias = "t")]
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Manage tag types
    Tagtype {
        #[command(subcommand)]
        command: TagTypeCommands,
    },

    /// Search photos across all albums by tag and capture date
    #[command(visible_alias = "s")]
    Search {
        /// Tags to search for as type=value (can specify multiple: -t a=b -t c=d)
        #[arg(short = 't', long = "tag", value_name = "TYPE=VALUE", num_args = 0..)]
        tags: Vec<String>,

        /// Match photos with ANY of the specified tags (OR logic, default is AND)
        #[arg(long = "any", conflicts_with = "all")]
        any: bool,

        /// Match photos with ALL of the specified tags (AND logic, explicit)
        #[arg(long = "all", conflicts_with = "any")]
        all: bool,

        /// Only photos taken after this date (exclusive)
        #[arg(long = "from", value_name = "DATE", value_parser = parse_date)]
        from: Option<NaiveDateTime>,

        /// Only photos taken before this date (exclusive)
        #[arg(long = "to", value_name = "DATE", value_parser = parse_date)]
        to: Option<NaiveDateTime>,

        /// Create an album from the results
        #[arg(long = "save-as", value_name = "ALBUM")]
        save_as: Option<String>,
    },

    /// Step through an album's photos
    Slideshow {
        /// Album name
        album: String,

        /// Open each photo in the default viewer as it is shown
        #[arg(short = 'o', long = "open")]
        open: bool,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: Shell,
    },
}

impl Commands {
    /// Whether the command may change the user graph and needs a save afterwards
    #[must_use]
    pub const fn mutates(&self) -> bool {
        match self {
            Self::User { command } => !matches!(command, UserCommands::List),
            Self::Album { command } => {
                !matches!(command, AlbumCommands::List | AlbumCommands::Show { .. })
            }
            Self::Photo { command } => !matches!(command, PhotoCommands::Show { .. }),
            Self::Tag { .. } => true,
            Self::Tagtype { command } => !matches!(command, TagTypeCommands::List),
            Self::Search { save_as, .. } => save_as.is_some(),
            Self::Login { .. }
            | Self::Logout
            | Self::Whoami
            | Self::Slideshow { .. }
            | Self::Config { .. }
            | Self::Completions { .. } => false,
        }
    }

    /// Whether the command works without loading the data file
    #[must_use]
    pub const fn is_standalone(&self) -> bool {
        matches!(
            self,
            Self::Logout | Self::Config { .. } | Self::Completions { .. }
        )
    }

    /// Helper method to get search parameters from the Search command
    #[must_use]
    pub fn get_search_params(&self) -> Option<SearchParams> {
        match self {
            Self::Search {
                tags,
                any,
                from,
                to,
                save_as,
                ..
            } => Some(SearchParams {
                tags: tags.clone(),
                mode: if *any { SearchMode::Any } else { SearchMode::All },
                from: *from,
                to: *to,
                save_as: save_as.clone(),
            }),
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, at_time};

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["photos", "-q", "--user", "alice", "--data", "/tmp/d.json", "whoami"]);
        assert!(cli.quiet);
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/d.json")));
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["photos", "album", "list", "-u", "bob"]);
        assert_eq!(cli.user.as_deref(), Some("bob"));
        assert!(matches!(
            cli.command,
            Commands::Album { command: AlbumCommands::List }
        ));
    }

    #[test]
    fn test_parse_photo_add_with_many_paths() {
        let cli = Cli::parse_from(["photos", "photo", "add", "trip", "a.jpg", "pics/*.png"]);
        if let Commands::Photo { command: PhotoCommands::Add { album, paths } } = cli.command {
            assert_eq!(album, "trip");
            assert_eq!(paths, vec!["a.jpg".to_string(), "pics/*.png".to_string()]);
        } else {
            panic!("Expected photo add command");
        }
    }

    #[test]
    fn test_photo_add_requires_paths() {
        assert!(Cli::try_parse_from(["photos", "photo", "add", "trip"]).is_err());
    }

    #[test]
    fn test_parse_photo_move() {
        let cli = Cli::parse_from(["photos", "photo", "mv", "a.jpg", "--from", "inbox", "--to", "trip"]);
        if let Commands::Photo { command: PhotoCommands::Move { path, from, to } } = cli.command {
            assert_eq!(path, "a.jpg");
            assert_eq!(from, "inbox");
            assert_eq!(to, "trip");
        } else {
            panic!("Expected photo move command");
        }
    }

    #[test]
    fn test_parse_search_defaults_to_all() {
        let cli = Cli::parse_from(["photos", "search", "-t", "location=paris", "-t", "people=bob"]);
        let params = cli.command.get_search_params().unwrap();
        assert_eq!(params.tags, vec!["location=paris".to_string(), "people=bob".to_string()]);
        assert_eq!(params.mode, SearchMode::All);
        assert!(params.has_criteria());
        assert!(!cli.command.mutates());
    }

    #[test]
    fn test_parse_search_any_with_dates() {
        let cli = Cli::parse_from([
            "photos", "search", "-t", "people=bob", "--any", "--from", "2024-01-01", "--to",
            "2024-02-01 12:30", "--save-as", "winter",
        ]);
        let params = cli.command.get_search_params().unwrap();
        assert_eq!(params.mode, SearchMode::Any);
        assert_eq!(params.from, Some(at(2024, 1, 1)));
        assert_eq!(params.to, Some(at_time(2024, 2, 1, 12, 30, 0)));
        assert_eq!(params.save_as.as_deref(), Some("winter"));
        assert!(cli.command.mutates());
    }

    #[test]
    fn test_search_any_and_all_conflict() {
        assert!(Cli::try_parse_from(["photos", "search", "--any", "--all"]).is_err());
    }

    #[test]
    fn test_search_rejects_bad_date() {
        assert!(Cli::try_parse_from(["photos", "search", "--from", "yesterday"]).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-05"), Ok(at(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05 18:30"), Ok(at_time(2024, 3, 5, 18, 30, 0)));
        assert_eq!(parse_date("2024-03-05T18:30:15"), Ok(at_time(2024, 3, 5, 18, 30, 15)));
        assert!(parse_date("05/03/2024").is_err());
    }

    #[test]
    fn test_mutating_commands() {
        let mutates = |args: &[&str]| Cli::parse_from(args).command.mutates();
        assert!(mutates(&["photos", "album", "create", "trip"]));
        assert!(mutates(&["photos", "tag", "add", "a.jpg", "location=paris"]));
        assert!(mutates(&["photos", "tagtype", "add", "mood", "--multi"]));
        assert!(mutates(&["photos", "user", "add", "bob"]));
        assert!(!mutates(&["photos", "album", "show", "trip"]));
        assert!(!mutates(&["photos", "tagtype", "list"]));
        assert!(!mutates(&["photos", "slideshow", "trip"]));
        assert!(!mutates(&["photos", "login", "alice"]));
    }

    #[test]
    fn test_standalone_commands() {
        assert!(Cli::parse_from(["photos", "completions", "bash"]).command.is_standalone());
        assert!(Cli::parse_from(["photos", "config", "get", "quiet"]).command.is_standalone());
        assert!(!Cli::parse_from(["photos", "album", "list"]).command.is_standalone());
    }
}
