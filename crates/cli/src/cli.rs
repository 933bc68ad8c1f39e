use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use specimark_core::query::ContextFilter;
use specimark_core::scope::{MediaScope, Visibility};
use specimark_core::types::DbId;

/// Manage media annotations on a specimen curation server.
#[derive(Debug, Parser)]
#[command(name = "specimark", version, about)]
pub struct Cli {
    /// Server base URL. Overrides SPECIMARK_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the annotations of one media item, one tab-separated row each.
    Fetch {
        #[command(flatten)]
        media: MediaArgs,
        /// Annotation type, e.g. `M` for media views.
        #[arg(long = "type", default_value = "M")]
        annotation_type: String,
        #[arg(long)]
        link: Option<DbId>,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print annotation counts by shape and author.
    Stats {
        #[command(flatten)]
        media: MediaArgs,
        #[arg(long = "type", default_value = "M")]
        annotation_type: String,
    },
    /// Export annotations in a server-side format.
    Export {
        #[command(flatten)]
        media: MediaArgs,
        #[arg(long = "type", default_value = "M")]
        annotation_type: String,
        /// `json`, `csv`, or any other format the server supports.
        #[arg(long, default_value = "json")]
        format: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Delete annotations by id.
    Delete {
        #[command(flatten)]
        media: MediaArgs,
        #[arg(required = true)]
        ids: Vec<DbId>,
    },
    /// Check a local JSON file of wire records without contacting the server.
    Validate {
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct MediaArgs {
    #[arg(long)]
    pub project: DbId,
    #[arg(long)]
    pub media: DbId,
    /// The project is published; use the public namespace.
    #[arg(long)]
    pub public: bool,
}

impl MediaArgs {
    pub fn scope(&self) -> anyhow::Result<MediaScope> {
        Ok(MediaScope::new(
            self.project,
            self.media,
            Visibility::from_published(self.public),
        )?)
    }
}

#[derive(Debug, Args)]
pub struct ContextArgs {
    #[arg(long, requires = "context_id")]
    pub context_type: Option<String>,
    #[arg(long)]
    pub context_id: Option<DbId>,
}

impl ContextArgs {
    pub fn filter(&self) -> ContextFilter {
        ContextFilter {
            context_type: self.context_type.clone(),
            context_id: self.context_id,
        }
    }
}
