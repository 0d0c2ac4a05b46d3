//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "inkwell", version, about = "Edit and manage blog posts from the terminal")]
pub struct Cli {
    /// Answer yes to retract/delete confirmations.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a post's metadata and markdown body.
    Show { id: String },

    /// Create a draft from a markdown file (or an empty body).
    New {
        #[arg(long)]
        title: String,
        file: Option<PathBuf>,
    },

    /// Update an existing post's title and/or body.
    Save {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Publish a post.
    Publish { id: String },

    /// Take a published post back to draft.
    Retract { id: String },

    /// Delete a post.
    Delete { id: String },

    /// Upload an image and append it to the post body.
    Image { id: String, path: PathBuf },

    /// Replace a post's tags.
    Tags { id: String, tags: Vec<String> },

    /// Interactive editing session with autosave.
    Edit { id: Option<String> },
}
