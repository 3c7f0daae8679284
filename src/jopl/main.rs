use clap::Parser;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;

use jopl::client::{Client, DEFAULT_LIST_FIELDS, DEFAULT_RESOURCE_FIELDS};
use jopl::columns::{
    self, NOTEBOOK_COLUMNS, NOTE_COLUMNS, RESOURCE_COLUMNS, SEARCH_COLUMNS, TAG_COLUMNS,
};
use jopl::config::JoplConfig;
use jopl::error::{JoplError, Result};
use jopl::fetch::Order;
use jopl::model::ITEM_TYPES;

mod args;
mod print;

use args::{
    Cli, Commands, CreateNoteArgs, CreateTarget, DeleteTarget, ListArgs, ListNotesArgs,
    ListTagsArgs, ListTarget, NoteLookup, SearchArgs,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

pub(crate) fn version_string() -> String {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    if GIT_HASH.is_empty() {
        VERSION.to_string()
    } else {
        format!("{VERSION}@{GIT_HASH} {GIT_COMMIT_DATE}")
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = JoplConfig::config_dir()?;
    let config = JoplConfig::load(&config_dir).unwrap_or_default();

    let had_token = config
        .api_token
        .as_deref()
        .is_some_and(|token| !token.is_empty());

    let client = Client::connect(config.api_token.as_deref())?;

    // A freshly paired token gets persisted for the next run.
    if !had_token {
        let updated = JoplConfig {
            api_token: Some(client.api_token().to_owned()),
        };
        updated.save(&config_dir)?;
        println!(
            "{}",
            format!("Access token stored in {}", config_dir.display()).dimmed()
        );
    }

    match cli.command {
        Commands::List(ListTarget::Tags(args)) => handle_list_tags(&client, args),
        Commands::List(ListTarget::Notes(args)) => handle_list_notes(&client, args),
        Commands::List(ListTarget::Notebooks(args)) => handle_list_notebooks(&client, args),
        Commands::List(ListTarget::Resources(args)) => handle_list_resources(&client, args),
        Commands::Delete(DeleteTarget::Tags { ids }) => handle_delete_tags(&client, &ids),
        Commands::Delete(DeleteTarget::Tag { tag_id, note_id }) => {
            handle_detach_tag(&client, &tag_id, &note_id)
        }
        Commands::Search(args) => handle_search(&client, args),
        Commands::Create(CreateTarget::Note(args)) => handle_create_note(&client, args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "jopl=debug" } else { "jopl=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn order_of(args: &ListArgs) -> Order<'_> {
    Order {
        by: args.order_by.as_deref(),
        dir: args.order_dir.as_deref(),
    }
}

fn fields_of(args: &ListArgs, default: &str) -> String {
    args.fields.clone().unwrap_or_else(|| default.to_string())
}

fn handle_list_tags(client: &Client, args: ListTagsArgs) -> Result<()> {
    let fields = fields_of(&args.common, DEFAULT_LIST_FIELDS);
    let columns = columns::select(TAG_COLUMNS, &fields)?;
    let order = order_of(&args.common);

    if args.duplicates_only {
        // Grouping needs id and title whatever the display selection says.
        let tags = client.tags(DEFAULT_LIST_FIELDS, order)?;
        let mut by_title: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for tag in tags {
            by_title.entry(tag.title).or_default().push(tag.id);
        }

        let mut duplicates = 0;
        for (title, ids) in &by_title {
            if ids.len() > 1 {
                duplicates += 1;
                println!("{}: {}", title.bold(), ids.join(" "));
            }
        }
        if duplicates == 0 {
            println!("No duplicates found.");
        }
        return Ok(());
    }

    let mut rows = Vec::new();
    if args.common.ids.is_empty() {
        let tags = client.tags(&fields, order)?;
        if args.orphans_only {
            for tag in tags {
                let notes = client.notes_by_tag(&tag.id, DEFAULT_LIST_FIELDS, order)?;
                if notes.is_empty() {
                    rows.push(tag);
                }
            }
            if rows.is_empty() {
                println!("No orphans found.");
                return Ok(());
            }
        } else {
            rows = tags;
        }
    } else {
        for id in &args.common.ids {
            match client.tag(id, &fields) {
                Ok(tag) => rows.push(tag),
                Err(err @ JoplError::NotFound(_)) => print::print_id_error(id, &err),
                Err(err) => return Err(err),
            }
        }
    }

    print::print_table("Tags", &columns, &rows, args.common.no_header);
    Ok(())
}

fn handle_list_notes(client: &Client, args: ListNotesArgs) -> Result<()> {
    let fields = fields_of(&args.common, DEFAULT_LIST_FIELDS);
    let columns = columns::select(NOTE_COLUMNS, &fields)?;
    let order = order_of(&args.common);

    let mut rows = Vec::new();
    if args.common.ids.is_empty() {
        rows = match &args.notebook {
            Some(notebook_id) => client.notes_in_notebook(notebook_id, &fields, order)?,
            None => client.notes(&fields, order)?,
        };
    } else {
        for id in &args.common.ids {
            match args.by {
                NoteLookup::Tag => match client.notes_by_tag(id, &fields, order) {
                    Ok(notes) => rows.extend(notes),
                    Err(err @ JoplError::NotFound(_)) => print::print_id_error(id, &err),
                    Err(err) => return Err(err),
                },
                NoteLookup::Id => match client.note(id, &fields) {
                    Ok(note) => rows.push(note),
                    Err(err @ JoplError::NotFound(_)) => print::print_id_error(id, &err),
                    Err(err) => return Err(err),
                },
            }
        }
    }

    print::print_table("Notes", &columns, &rows, args.common.no_header);
    Ok(())
}

fn handle_list_notebooks(client: &Client, args: ListArgs) -> Result<()> {
    let fields = fields_of(&args, DEFAULT_LIST_FIELDS);
    let columns = columns::select(NOTEBOOK_COLUMNS, &fields)?;
    let order = order_of(&args);

    let mut rows = Vec::new();
    if args.ids.is_empty() {
        rows = client.notebooks(&fields, order)?;
    } else {
        for id in &args.ids {
            match client.notebook(id, &fields) {
                Ok(notebook) => rows.push(notebook),
                Err(err @ JoplError::NotFound(_)) => print::print_id_error(id, &err),
                Err(err) => return Err(err),
            }
        }
    }

    print::print_table("Notebooks", &columns, &rows, args.no_header);
    Ok(())
}

fn handle_list_resources(client: &Client, args: ListArgs) -> Result<()> {
    let fields = fields_of(&args, DEFAULT_RESOURCE_FIELDS);
    let columns = columns::select(RESOURCE_COLUMNS, &fields)?;
    let order = order_of(&args);

    let mut rows = Vec::new();
    if args.ids.is_empty() {
        rows = client.resources(&fields, order)?;
    } else {
        for id in &args.ids {
            match client.resource(id, &fields) {
                Ok(resource) => rows.push(resource),
                Err(err @ JoplError::NotFound(_)) => print::print_id_error(id, &err),
                Err(err) => return Err(err),
            }
        }
    }

    print::print_table("Resources", &columns, &rows, args.no_header);
    Ok(())
}

fn handle_delete_tags(client: &Client, ids: &[String]) -> Result<()> {
    for id in ids {
        match client.delete_tag(id) {
            Ok(()) => println!("{}", format!("Tag '{id}' deleted").green()),
            Err(err @ JoplError::NotFound(_)) => println!("{}", err.to_string().red()),
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn handle_detach_tag(client: &Client, tag_id: &str, note_id: &str) -> Result<()> {
    client.detach_tag(tag_id, note_id)?;
    println!(
        "{}",
        format!("Tag '{tag_id}' detached from note '{note_id}'").green()
    );
    Ok(())
}

fn handle_search(client: &Client, args: SearchArgs) -> Result<()> {
    if let Some(kind) = &args.item_type {
        if !ITEM_TYPES.contains(&kind.as_str()) {
            return Err(JoplError::UnknownItemType(kind.clone()));
        }
    }

    let fields = args
        .fields
        .clone()
        .unwrap_or_else(|| DEFAULT_LIST_FIELDS.to_string());
    let columns = columns::select(SEARCH_COLUMNS, &fields)?;

    let items = client.search(&args.query, args.item_type.as_deref(), Some(&fields))?;
    print::print_table("Search", &columns, &items, args.no_header);
    Ok(())
}

fn handle_create_note(client: &Client, args: CreateNoteArgs) -> Result<()> {
    let body = match args.body.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => args.body.clone(),
    };

    let note = client.create_note(
        &args.title,
        args.format.into(),
        &body,
        &args.notebook,
        &args.tags,
    )?;
    println!(
        "{}",
        format!("Created note '{}' ({})", args.title, note.id).green()
    );
    Ok(())
}
