use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tokio::sync::mpsc;
use tracing::info;
use weather_widget_core::{Config, HtmlPage, OpenMeteoClient, Orchestrator, Page, PageEvent};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-widget",
    version,
    about = "City weather cards from Open-Meteo"
)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the preset city list and geocoding language.
    Configure,

    /// Show the weather card for one city.
    Show {
        /// City name, e.g. "Tokyo".
        city: String,

        /// Write a full HTML page here instead of printing the card.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show cards for every preset city.
    List {
        /// Write a full HTML page here instead of printing the cards.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render the whole page: preset list, then an optional search.
    Page {
        /// City to search for after the preset list loads.
        #[arg(long)]
        search: Option<String>,

        /// Output file; stdout when absent.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Load the page, then keep prompting for cities and rewriting the page file.
    Interactive {
        /// Page file rewritten after every update.
        #[arg(long)]
        output: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            config: config_path,
            command,
        } = self;

        let config = match config_path.as_deref() {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match command {
            Command::Configure => configure(config, config_path.as_deref()),
            Command::Show { city, output } => {
                let (orchestrator, mut page) = setup(&config)?;
                page.set_input(&city);
                orchestrator.submit_search(&mut page).await;
                emit(&page, page.search_content(), output.as_deref())
            }
            Command::List { output } => {
                let (orchestrator, mut page) = setup(&config)?;
                orchestrator.render_preset_list(&mut page).await;
                emit(&page, page.list_content(), output.as_deref())
            }
            Command::Page { search, output } => {
                let (orchestrator, mut page) = setup(&config)?;
                orchestrator.handle(PageEvent::Load, &mut page).await;
                if let Some(city) = search {
                    orchestrator.handle(PageEvent::Input(city), &mut page).await;
                    orchestrator.handle(PageEvent::Submit, &mut page).await;
                }
                let document = page.to_document();
                emit(&page, &document, output.as_deref())
            }
            Command::Interactive { output } => {
                let (orchestrator, page) = setup(&config)?;
                interactive(orchestrator, page, output).await
            }
        }
    }
}

fn setup(config: &Config) -> Result<(Orchestrator, HtmlPage)> {
    let orchestrator = Orchestrator::with_client(
        OpenMeteoClient::from_config(config)?,
        config.preset_cities.clone(),
    );
    let page = HtmlPage::new("Weather").with_stylesheet(config.stylesheet.clone());
    Ok((orchestrator, page))
}

fn configure(mut config: Config, path: Option<&Path>) -> Result<()> {
    let current = config.preset_cities.join(", ");
    let cities = Text::new("Preset cities (comma-separated):")
        .with_initial_value(&current)
        .prompt()?;
    config.set_preset_cities(cities.split(','));

    let language = Text::new("Geocoding language:")
        .with_default(&config.language)
        .prompt()?;
    config.language = language.trim().to_string();

    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }

    println!("Saved {} preset cities.", config.preset_cities.len());
    Ok(())
}

/// Print `fragment`, or write the full page to `output` when given.
fn emit(page: &HtmlPage, fragment: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_document(page, path),
        None => {
            println!("{}", fragment.trim());
            Ok(())
        }
    }
}

fn write_document(page: &HtmlPage, path: &Path) -> Result<()> {
    fs::write(path, page.to_document())
        .with_context(|| format!("Failed to write page: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

async fn interactive(
    orchestrator: Orchestrator,
    mut page: HtmlPage,
    output: PathBuf,
) -> Result<()> {
    let (tx, rx) = mpsc::channel(8);
    tx.send(PageEvent::Load)
        .await
        .context("Page event channel closed")?;

    let prompter = tokio::task::spawn_blocking(move || prompt_loop(tx));

    orchestrator
        .run(rx, &mut page, |page| write_document(page, &output))
        .await?;

    prompter.await.context("Prompt task failed")?
}

/// Feeds typed cities into the page until the user cancels.
fn prompt_loop(tx: mpsc::Sender<PageEvent>) -> Result<()> {
    loop {
        let answer = Text::new("City:")
            .with_help_message("Esc to quit")
            .prompt();

        match answer {
            Ok(city) => {
                let sent = tx
                    .blocking_send(PageEvent::Input(city))
                    .and_then(|_| tx.blocking_send(PageEvent::Submit));
                if sent.is_err() {
                    return Ok(());
                }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_output() {
        let cli = Cli::try_parse_from(["weather-widget", "show", "Tokyo", "--output", "out.html"])
            .expect("valid args");
        match cli.command {
            Command::Show { city, output } => {
                assert_eq!(city, "Tokyo");
                assert_eq!(output, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["weather-widget", "list", "--config", "alt.toml"])
            .expect("valid args");
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Command::List { output: None }));
    }

    #[test]
    fn interactive_requires_output() {
        assert!(Cli::try_parse_from(["weather-widget", "interactive"]).is_err());
    }

    #[test]
    fn emit_writes_full_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("page.html");
        let mut page = HtmlPage::new("Weather");
        page.set_list_content("<p>cards</p>".into());

        emit(&page, page.list_content(), Some(&path)).expect("emit");

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("<p>cards</p>"));
    }
}
