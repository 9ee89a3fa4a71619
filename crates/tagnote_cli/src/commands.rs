//! Command definitions and execution for the `tagnote` binary.
//!
//! # Responsibility
//! - Declare the command-line surface (`clap` derive).
//! - Drive `NotebookService` and render results as plain text.
//!
//! # Invariants
//! - Unknown tag IDs are rejected before anything is written.
//! - Unknown note IDs are reported as errors; core itself treats them as
//!   no-ops.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use tagnote_core::{Note, NoteData, NoteFilter, NoteRepository, NotebookService, Tag, TagRepository};

#[derive(Debug, Parser)]
#[command(
    name = "tagnote",
    version,
    about = "Tagged markdown notes",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Health check; prints `pong`.
    Ping,
    /// Print the core version.
    Version,
    /// List tags as `<id>\t<label>`.
    Tags,
    /// Manage the tag registry.
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Create a note and print its id.
    New {
        #[arg(long, required = true)]
        title: String,
        #[arg(long, required = true)]
        body: String,
        #[command(flatten)]
        tags: TagSelection,
    },
    /// Edit a note; omitted fields keep their current value.
    Edit {
        note_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[command(flatten)]
        tags: TagSelection,
    },
    /// Delete a note.
    Rm { note_id: String },
    /// Print one note with its tags.
    Show { note_id: String },
    /// List notes matching a title query and every selected tag.
    List {
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "tag")]
        tag_ids: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TagAction {
    /// Create a tag and print its id.
    Add { label: String },
    /// Change a tag's label.
    Rename { tag_id: String, label: String },
    /// Delete a tag and detach it from every note.
    Delete { tag_id: String },
}

/// Tag selection flags shared by `new` and `edit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct TagSelection {
    /// Select an existing tag by id (repeatable).
    #[arg(long = "tag")]
    pub tag_ids: Vec<String>,
    /// Create a tag with this label and select it (repeatable).
    #[arg(long = "new-tag")]
    pub new_tags: Vec<String>,
}

impl TagSelection {
    fn is_empty(&self) -> bool {
        self.tag_ids.is_empty() && self.new_tags.is_empty()
    }
}

impl Command {
    /// Whether the command needs the notebook database.
    pub fn needs_store(&self) -> bool {
        !matches!(self, Self::Ping | Self::Version)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Version => "version",
            Self::Tags => "tags",
            Self::Tag { action } => match action {
                TagAction::Add { .. } => "tag_add",
                TagAction::Rename { .. } => "tag_rename",
                TagAction::Delete { .. } => "tag_delete",
            },
            Self::New { .. } => "new",
            Self::Edit { .. } => "edit",
            Self::Rm { .. } => "rm",
            Self::Show { .. } => "show",
            Self::List { .. } => "list",
        }
    }
}

/// Writes output of commands that need no database.
pub fn execute_static<W: Write>(command: &Command, out: &mut W) -> Result<()> {
    match command {
        Command::Ping => writeln!(out, "{}", tagnote_core::ping())?,
        Command::Version => writeln!(out, "tagnote {}", tagnote_core::core_version())?,
        other => bail!("`{}` needs the notebook database", other.name()),
    }
    Ok(())
}

/// Runs a command against the notebook and writes its output to `out`.
pub fn execute<R, W>(command: Command, service: &mut NotebookService<R>, out: &mut W) -> Result<()>
where
    R: NoteRepository + TagRepository,
    W: Write,
{
    match command {
        Command::Ping | Command::Version => execute_static(&command, out)?,
        Command::Tags => {
            for tag in service.tags() {
                writeln!(out, "{}\t{}", tag.id, tag.label)?;
            }
        }
        Command::Tag { action } => execute_tag(action, service, out)?,
        Command::New { title, body, tags } => {
            let tags = selected_tags(service, &tags, Vec::new())?;
            let note_id = service
                .create_note(&NoteData::new(title, body, tags))
                .context("failed to create note")?;
            writeln!(out, "{note_id}")?;
        }
        Command::Edit {
            note_id,
            title,
            body,
            tags,
        } => {
            let Some(current) = service.note(&note_id) else {
                bail!("no note with id `{note_id}`");
            };
            let base_tags = if tags.is_empty() {
                current.tags.clone()
            } else {
                Vec::new()
            };
            let tags = selected_tags(service, &tags, base_tags)?;
            let data = NoteData::new(
                title.unwrap_or(current.title),
                body.unwrap_or(current.markdown),
                tags,
            );
            service
                .update_note(&note_id, &data)
                .context("failed to update note")?;
        }
        Command::Rm { note_id } => {
            if !service
                .delete_note(&note_id)
                .context("failed to delete note")?
            {
                bail!("no note with id `{note_id}`");
            }
        }
        Command::Show { note_id } => {
            let Some(note) = service.note(&note_id) else {
                bail!("no note with id `{note_id}`");
            };
            writeln!(out, "# {}", note.title)?;
            if !note.tags.is_empty() {
                writeln!(out, "tags: {}", tag_labels(&note))?;
            }
            writeln!(out)?;
            writeln!(out, "{}", note.markdown)?;
        }
        Command::List { title, tag_ids } => {
            let selected = service
                .resolve_tags(&tag_ids)
                .map_err(|missing| anyhow!("unknown tag id(s): {}", missing.join(", ")))?;
            let filter = NoteFilter::new(title.unwrap_or_default(), selected);
            for note in service.filter_notes(&filter) {
                write_list_row(out, &note)?;
            }
        }
    }
    Ok(())
}

fn execute_tag<R, W>(action: TagAction, service: &mut NotebookService<R>, out: &mut W) -> Result<()>
where
    R: NoteRepository + TagRepository,
    W: Write,
{
    match action {
        TagAction::Add { label } => {
            let tag = service.add_tag(label).context("failed to add tag")?;
            writeln!(out, "{}", tag.id)?;
        }
        TagAction::Rename { tag_id, label } => {
            if !service
                .update_tag_label(&tag_id, label)
                .context("failed to rename tag")?
            {
                bail!("no tag with id `{tag_id}`");
            }
        }
        TagAction::Delete { tag_id } => {
            if !service.delete_tag(&tag_id).context("failed to delete tag")? {
                bail!("no tag with id `{tag_id}`");
            }
        }
    }
    Ok(())
}

/// Resolves `--tag` IDs, then creates `--new-tag` labels and selects them.
fn selected_tags<R>(
    service: &mut NotebookService<R>,
    selection: &TagSelection,
    mut tags: Vec<Tag>,
) -> Result<Vec<Tag>>
where
    R: NoteRepository + TagRepository,
{
    let resolved = service
        .resolve_tags(&selection.tag_ids)
        .map_err(|missing| anyhow!("unknown tag id(s): {}", missing.join(", ")))?;
    tags.extend(resolved);
    for label in &selection.new_tags {
        tags.push(service.add_tag(label.clone()).context("failed to add tag")?);
    }
    Ok(tags)
}

fn write_list_row<W: Write>(out: &mut W, note: &Note) -> Result<()> {
    if note.tags.is_empty() {
        writeln!(out, "{}\t{}", note.id, note.title)?;
    } else {
        writeln!(out, "{}\t{}\t[{}]", note.id, note.title, tag_labels(note))?;
    }
    Ok(())
}

fn tag_labels(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| tag.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Command, TagAction, TagSelection};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use tagnote_core::{KvRepository, MemoryKvStore, NotebookService};

    type Service = NotebookService<KvRepository<MemoryKvStore>>;

    fn parse_args(raw: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("tagnote").chain(raw.iter().copied()))
            .map(|cli| cli.command)
    }

    fn service() -> Service {
        NotebookService::open(KvRepository::new(MemoryKvStore::new())).unwrap()
    }

    fn run(service: &mut Service, raw: &[&str]) -> String {
        let command = parse_args(raw).unwrap();
        let mut out = Vec::new();
        execute(command, service, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn empty_args_show_help() {
        let err = parse_args(&[]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn parses_note_flags_in_any_order() {
        let command = parse_args(&[
            "new", "--tag", "t1", "--body", "milk", "--title", "Groceries", "--new-tag", "home",
        ])
        .unwrap();
        assert_eq!(
            command,
            Command::New {
                title: "Groceries".to_string(),
                body: "milk".to_string(),
                tags: TagSelection {
                    tag_ids: vec!["t1".to_string()],
                    new_tags: vec!["home".to_string()],
                },
            }
        );
    }

    #[test]
    fn parses_nested_tag_actions() {
        assert_eq!(
            parse_args(&["tag", "rename", "t1", "office"]).unwrap(),
            Command::Tag {
                action: TagAction::Rename {
                    tag_id: "t1".to_string(),
                    label: "office".to_string(),
                },
            }
        );
    }

    #[test]
    fn rejects_incomplete_input() {
        assert!(parse_args(&["new", "--title", "only"]).is_err());
        assert!(parse_args(&["list", "--tag"]).is_err());
        assert!(parse_args(&["tag", "rename", "t1"]).is_err());
        assert!(parse_args(&["edit", "--title", "x"]).is_err());
        assert!(parse_args(&["bogus"]).is_err());
    }

    #[test]
    fn new_with_inline_tag_then_list_by_tag() {
        let mut service = service();
        run(
            &mut service,
            &["new", "--title", "Report", "--body", "**draft**", "--new-tag", "work"],
        );
        run(&mut service, &["new", "--title", "Groceries", "--body", "milk"]);
        let work_id = service.tags()[0].id.clone();

        let listed = run(&mut service, &["list", "--tag", &work_id]);
        assert!(listed.contains("Report\t[work]"));
        assert!(!listed.contains("Groceries"));
    }

    #[test]
    fn edit_keeps_unspecified_fields() {
        let mut service = service();
        let tag_id = run(&mut service, &["tag", "add", "home"]).trim().to_string();
        let note_id = run(
            &mut service,
            &["new", "--title", "Groceries", "--body", "milk", "--tag", &tag_id],
        )
        .trim()
        .to_string();

        run(&mut service, &["edit", &note_id, "--title", "Shopping"]);

        let note = service.note(&note_id).unwrap();
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.markdown, "milk");
        assert_eq!(note.tags.len(), 1);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut service = service();
        let mut out = Vec::new();

        let show = parse_args(&["show", "missing"]).unwrap();
        assert!(execute(show, &mut service, &mut out).is_err());

        let new = parse_args(&["new", "--title", "a", "--body", "b", "--tag", "nope"]).unwrap();
        assert!(execute(new, &mut service, &mut out).is_err());
        assert!(service.raw_notes().is_empty());
    }

    #[test]
    fn tag_delete_detaches_from_notes() {
        let mut service = service();
        let tag_id = run(&mut service, &["tag", "add", "work"]).trim().to_string();
        let note_id = run(
            &mut service,
            &["new", "--title", "Report", "--body", "x", "--tag", &tag_id],
        )
        .trim()
        .to_string();

        run(&mut service, &["tag", "delete", &tag_id]);

        let shown = run(&mut service, &["show", &note_id]);
        assert!(!shown.contains("tags:"));
        assert!(run(&mut service, &["tags"]).is_empty());
    }
}
