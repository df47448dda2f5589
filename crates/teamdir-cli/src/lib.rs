//! Teamdir command line adapter over the directory core

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use teamdir_core::{load_roster, LoadError, Member, MemberId, RosterSource};
use teamdir_directory::render::render_load_failure;
use teamdir_directory::{
    ConfigError, Debouncer, Direction, Directory, DirectoryConfig, FilterCriteria, HtmlRenderer,
    Summary, ViewMode,
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "teamdir",
    version,
    about = "Team directory renderer",
    long_about = "Loads a team roster, applies search and filters, and renders the static directory page or prints members"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TEAMDIR_ROSTER",
        help = "Roster source: `embedded`, a JSON file path, or an http(s) URL"
    )]
    pub roster: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long, default_value = "", help = "Free-text search over name, role, stream, and bio")]
    pub search: String,
    #[arg(long, default_value = "", help = "Stream to match exactly (case-insensitive)")]
    pub stream: String,
    #[arg(long, default_value = "", help = "Role to match as a substring")]
    pub role: String,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        Self::new()
            .with_search(args.search)
            .with_stream(args.stream)
            .with_news_type(args.role)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Render the static directory page")]
    Render {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, help = "Card layout: grid or list")]
        view: Option<ViewMode>,
        #[arg(long, default_value = "Team Directory", help = "Page title")]
        title: String,
        #[arg(long, help = "Write the page to this file instead of stdout")]
        out: Option<PathBuf>,
    },
    #[command(about = "Print the summary and matching members")]
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    #[command(about = "Show one member's details, optionally stepping through the filtered view")]
    Show {
        #[arg(help = "Member id, e.g. mr-bomah")]
        id: String,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long = "step", help = "Navigation step to apply: prev or next (repeatable)")]
        steps: Vec<Direction>,
    },
    #[command(
        about = "Read search text from stdin, one line per edit, and print matches once typing pauses"
    )]
    Search {
        #[command(flatten)]
        filters: FilterArgs,
    },
    #[command(about = "Show a randomly chosen member of the filtered view")]
    Random {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load team members: {0}")]
    Load(#[from] LoadError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("no member with id {0}")]
    UnknownMember(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the failure is the roster load, which the page reports with a
    /// retry affordance.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}

fn roster_source(cli_roster: Option<&str>, config: &DirectoryConfig) -> RosterSource {
    match cli_roster {
        Some(roster) => roster.parse().unwrap_or_default(),
        None => config.roster_source(),
    }
}

fn member_line(member: &Member) -> String {
    let mut line = format!("{} ({}) - {}", member.name, member.id, member.news_type);
    if !member.stream.is_empty() {
        line.push_str(&format!(" [{}]", member.stream));
    }
    line
}

fn list_output(directory: &Directory, summary: Summary) -> String {
    let mut output = format!("{summary}\n");
    for (i, member) in directory.filtered().iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, member_line(member)));
    }
    output
}

/// Feed search edits through a debouncer and write the matches for each value
/// that survives the quiet window.
pub async fn search_session<R, W>(
    directory: &mut Directory,
    input: R,
    output: &mut W,
    window: Duration,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (debouncer, mut searches) = Debouncer::spawn(window, 64);
    let mut debouncer = Some(debouncer);
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if debouncer.is_some() => match line? {
                Some(text) => {
                    if let Some(debouncer) = &debouncer {
                        debouncer.push(text).await;
                    }
                }
                None => debouncer = None,
            },
            search = searches.recv() => match search {
                Some(search) => {
                    let summary = directory.set_search(search);
                    let block = format!("{}\n", list_output(directory, summary));
                    output.write_all(block.as_bytes()).await?;
                    output.flush().await?;
                }
                None => break,
            },
        }
    }
    Ok(())
}

fn member_detail(directory: &Directory, member: &Member) -> String {
    let mut output = member_line(member);
    if let Some(position) = directory.position_of(&member.id) {
        output.push_str(&format!("\nPosition: {position}"));
    }
    if !member.class_name.is_empty() {
        output.push_str(&format!("\nClass: {}", member.class_name));
    }
    if member.news_about.is_empty() {
        output.push_str(&format!(
            "\nMore information about {} will be added soon.",
            member.name
        ));
    } else {
        output.push_str(&format!("\n\n{}", member.news_about));
    }
    output
}

pub async fn run(cli: Cli, config: DirectoryConfig) -> Result<String, CliError> {
    let source = roster_source(cli.roster.as_deref(), &config);
    let roster = match load_roster(&source).await {
        Ok(roster) => roster,
        Err(err) => {
            if let Commands::Render { out: Some(path), .. } = &cli.command {
                tokio::fs::write(path, render_load_failure()).await?;
            }
            return Err(err.into());
        }
    };
    let mut directory = Directory::new(roster).with_view_mode(config.default_view);

    match cli.command {
        Commands::Render {
            filters,
            view,
            title,
            out,
        } => {
            let summary = directory.set_criteria(filters.into());
            if let Some(view) = view {
                directory.set_view_mode(view);
            }
            let renderer = HtmlRenderer::new(config.preview_len);
            let page = directory.render_page(&renderer, &title);
            match out {
                Some(path) => {
                    tokio::fs::write(&path, page).await?;
                    info!(path = %path.display(), shown = summary.shown, "Directory page written");
                    Ok(format!("page written: {} ({summary})", path.display()))
                }
                None => Ok(page),
            }
        }
        Commands::List { filters } => {
            let summary = directory.set_criteria(filters.into());
            Ok(list_output(&directory, summary))
        }
        Commands::Show { id, filters, steps } => {
            directory.set_criteria(filters.into());
            let member_id = MemberId::new(id.clone());
            directory
                .open(&member_id)
                .ok_or(CliError::UnknownMember(id))?;
            for direction in steps {
                directory.navigate(direction);
            }
            let member = directory
                .current()
                .ok_or_else(|| CliError::UnknownMember(member_id.to_string()))?;
            Ok(member_detail(&directory, member))
        }
        Commands::Search { filters } => {
            directory.set_criteria(filters.into());
            let mut stdout = tokio::io::stdout();
            search_session(
                &mut directory,
                BufReader::new(tokio::io::stdin()),
                &mut stdout,
                config.debounce(),
            )
            .await?;
            Ok(String::new())
        }
        Commands::Random { filters } => {
            let summary = directory.set_criteria(filters.into());
            let picked = directory.open_random(&mut rand::thread_rng()).cloned();
            match picked {
                Some(member) => Ok(member_detail(&directory, &member)),
                None => Ok(summary.to_string()),
            }
        }
    }
}
