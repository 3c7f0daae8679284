use clap::{Args, Parser, Subcommand, ValueEnum};
use jopl::model::NoteFormat;

#[derive(Parser, Debug)]
#[command(name = "jopl")]
#[command(version = crate::version_string())]
#[command(about = "Command-line client for the Joplin Data API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (logs every HTTP exchange)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tags, notes, notebooks or resources
    #[command(subcommand)]
    List(ListTarget),

    /// Delete tags, or detach a tag from a note
    #[command(subcommand)]
    Delete(DeleteTarget),

    /// Full-text search
    Search(SearchArgs),

    /// Create notes
    #[command(subcommand)]
    Create(CreateTarget),
}

#[derive(Subcommand, Debug)]
pub enum ListTarget {
    /// List tags
    Tags(ListTagsArgs),

    /// List notes
    Notes(ListNotesArgs),

    /// List notebooks
    Notebooks(ListArgs),

    /// List resources
    Resources(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Do not print the header
    #[arg(long)]
    pub no_header: bool,

    /// Show only the specified columns (comma-separated)
    #[arg(long)]
    pub fields: Option<String>,

    /// Order by the specified field
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order direction: asc or desc
    #[arg(long)]
    pub order_dir: Option<String>,

    /// Restrict output to the specified IDs
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ListTagsArgs {
    #[command(flatten)]
    pub common: ListArgs,

    /// List only tags whose title appears more than once
    #[arg(long)]
    pub duplicates_only: bool,

    /// List only tags with no notes attached
    #[arg(long)]
    pub orphans_only: bool,
}

#[derive(Args, Debug)]
pub struct ListNotesArgs {
    #[command(flatten)]
    pub common: ListArgs,

    /// Treat the positional IDs as this kind of ID
    #[arg(long, value_enum, default_value_t = NoteLookup::Id)]
    pub by: NoteLookup,

    /// List notes in the specified notebook ID
    #[arg(long = "in", value_name = "NOTEBOOK_ID")]
    pub notebook: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteLookup {
    /// Note IDs
    Id,
    /// Tag IDs: list the notes carrying each tag
    Tag,
}

#[derive(Subcommand, Debug)]
pub enum DeleteTarget {
    /// Delete tags by ID
    Tags {
        /// Tags to delete
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Detach a tag from a note (both stay alive)
    Tag {
        /// Tag ID
        tag_id: String,

        /// Note ID to detach the tag from
        #[arg(long = "from", value_name = "NOTE_ID")]
        note_id: String,
    },
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Do not print the header
    #[arg(long)]
    pub no_header: bool,

    /// Show only the specified columns (comma-separated)
    #[arg(long)]
    pub fields: Option<String>,

    /// Restrict results to an item type (folder, note, tag, ...)
    #[arg(long = "type", value_name = "TYPE")]
    pub item_type: Option<String>,

    /// Search query (Joplin search syntax)
    pub query: String,
}

#[derive(Subcommand, Debug)]
pub enum CreateTarget {
    /// Create a note
    Note(CreateNoteArgs),
}

#[derive(Args, Debug)]
pub struct CreateNoteArgs {
    /// Body format of the new note
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Title of the new note
    pub title: String,

    /// Body text; a leading '@' reads the body from the given file
    pub body: String,

    /// Name of the notebook to store the note in
    pub notebook: String,

    /// Tag names to attach to the new note
    #[arg(value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Html,
}

impl From<Format> for NoteFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => NoteFormat::Markdown,
            Format::Html => NoteFormat::Html,
        }
    }
}
