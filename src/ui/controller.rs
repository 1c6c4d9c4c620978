// Console controller - wires user input to the study workflow.
//
// Plays the role the search form plays in the original artifact: collects a
// topic (with an optional math-mode toggle), submits it, and renders the
// outcome. History selection prefills the next query without triggering a
// request.

use crate::models::{RequestState, SearchQuery};
use crate::services::StudyWorkflow;
use crate::state::StateManager;
use crate::store::PreferenceStore;
use crate::ui::render;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of console input, classified.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    ToggleMath,
    ToggleDark,
    History,
    Recall(Option<usize>),
    Help,
    Input(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            ":quit" | ":q" => Command::Quit,
            ":math" => Command::ToggleMath,
            ":dark" => Command::ToggleDark,
            ":history" => Command::History,
            ":help" => Command::Help,
            _ => {
                if let Some(rest) = trimmed.strip_prefix(":recall") {
                    Command::Recall(rest.trim().parse::<usize>().ok())
                } else {
                    Command::Input(line)
                }
            }
        }
    }
}

/// Interactive console front end.
///
/// Input is read line by line; submissions are awaited before the next
/// prompt, so at most one request is ever in flight from the UI's
/// perspective (the console equivalent of a disabled submit button).
pub struct ConsoleController {
    state: StateManager,
    store: Arc<Mutex<PreferenceStore>>,
    workflow: StudyWorkflow,
    math_mode: bool,
    prefill: Option<String>,
}

impl ConsoleController {
    pub fn new(
        state: StateManager,
        store: Arc<Mutex<PreferenceStore>>,
        workflow: StudyWorkflow,
    ) -> Self {
        Self {
            state,
            store,
            workflow,
            math_mode: false,
            prefill: None,
        }
    }

    /// Run the input loop until `:quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        println!("🧠 Smart Study Assistant");
        println!("Type a topic to study, or :help for commands.\n");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            self.print_prompt()?;
            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };

            match Command::parse(&line) {
                Command::Quit => break,
                Command::ToggleMath => {
                    self.math_mode = !self.math_mode;
                    println!(
                        "Math mode {}.",
                        if self.math_mode { "on" } else { "off" }
                    );
                }
                Command::ToggleDark => self.toggle_dark_mode(),
                Command::History => {
                    let store = self.store.lock().unwrap();
                    print!("{}", render::render_history(store.history()));
                }
                Command::Recall(index) => self.recall(index),
                Command::Help => Self::print_help(),
                Command::Input(input) => self.submit_input(input).await,
            }
        }

        Ok(())
    }

    fn print_prompt(&self) -> Result<()> {
        match &self.prefill {
            Some(topic) => print!("study [{}]> ", topic),
            None => print!("study> "),
        }
        std::io::stdout().flush().context("Failed to flush stdout")
    }

    fn print_help() {
        println!("Commands:");
        println!("  <topic>      search for study materials");
        println!("  :math        toggle math mode (quantitative question)");
        println!("  :dark        toggle dark mode");
        println!("  :history     show recent searches");
        println!("  :recall N    prefill topic N from the history");
        println!("  :quit        exit");
    }

    fn toggle_dark_mode(&self) {
        let mut store = self.store.lock().unwrap();
        let enabled = !store.dark_mode();
        match store.set_dark_mode(enabled) {
            Ok(()) => println!("Dark mode {}.", if enabled { "on" } else { "off" }),
            Err(e) => {
                tracing::warn!("Failed to persist dark mode: {:#}", e);
                println!("Dark mode {} (not saved).", if enabled { "on" } else { "off" });
            }
        }
    }

    fn recall(&mut self, index: Option<usize>) {
        let Some(index) = index.filter(|&i| i >= 1) else {
            println!("Usage: :recall N (see :history for numbers)");
            return;
        };

        let store = self.store.lock().unwrap();
        match store.select_topic(index - 1) {
            Some(topic) => {
                println!("Topic prefilled: {} (press Enter to search)", topic);
                self.prefill = Some(topic.to_string());
            }
            None => println!("No history entry {}.", index),
        }
    }

    /// Submit typed input, falling back to the prefilled topic on an empty
    /// line. An empty line without a prefill goes through the workflow
    /// anyway and surfaces the fixed validation message.
    async fn submit_input(&mut self, input: &str) {
        let topic = if input.trim().is_empty() {
            self.prefill.take().unwrap_or_default()
        } else {
            self.prefill = None;
            input.to_string()
        };

        let query = SearchQuery::new(&topic, self.math_mode);
        if !query.is_empty() {
            println!("⏳ Fetching study materials...");
        }

        self.workflow.submit(query).await;
        self.render_outcome();
    }

    fn render_outcome(&self) {
        let dark_mode = self.store.lock().unwrap().dark_mode();
        match self.state.snapshot().request {
            RequestState::Success(result) => {
                print!("\n{}", render::render_result(&result, dark_mode));
            }
            RequestState::Error(message) => {
                print!("\n{}", render::render_error(&message));
            }
            // Loading/Idle never survive an awaited submission
            other => tracing::debug!(?other, "No outcome to render"),
        }
        println!();
    }
}
