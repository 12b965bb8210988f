//! Command handlers.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! planner and renders the markdown result.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use waypoint_core::{
    display::{CreateResult, ProjectSummaries, Seeds},
    params::{Id, SubmitAnswer},
    Planner, PlannerError,
};

use crate::{
    args::{ElaborateCommands, ProjectCommands, SeedCommands, ShowProjectArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_seed_command(&self, command: SeedCommands) -> Result<()> {
        match command {
            SeedCommands::Add(args) => {
                let seed = self
                    .planner
                    .create_seed(&args.into())
                    .await
                    .context("Failed to create seed")?;
                self.renderer.render(&CreateResult::new(seed).to_string())
            }
            SeedCommands::List => self.list_seeds().await,
            SeedCommands::Show(args) => {
                let id: Id = args.into();
                let seed = self
                    .planner
                    .get_seed(&id)
                    .await?
                    .ok_or(PlannerError::SeedNotFound { id: id.id })?;
                self.renderer.render(&seed.to_string())
            }
        }
    }

    pub async fn list_seeds(&self) -> Result<()> {
        let seeds = self.planner.list_seeds().await?;
        self.renderer.render(&Seeds(seeds).to_string())
    }

    pub async fn handle_elaborate_command(&self, command: ElaborateCommands) -> Result<()> {
        match command {
            ElaborateCommands::Start(args) => {
                let turn = self
                    .planner
                    .start_elaboration(&args.into())
                    .await
                    .context("Failed to start elaboration")?;
                if let Some(session_id) = turn.session.session_id() {
                    self.renderer.render(&format!("Session: {session_id}\n\n"))?;
                }
                self.renderer.render(&turn.to_string())
            }
            ElaborateCommands::Answer(args) => {
                let turn = self.planner.submit_answer(&args.into()).await?;
                self.renderer.render(&turn.to_string())
            }
            ElaborateCommands::Status(args) => {
                let progress = self.planner.elaboration_progress(&args.into()).await?;
                self.renderer.render(&progress.to_string())
            }
            ElaborateCommands::Chat(args) => self.chat(args.into()).await,
        }
    }

    /// Reads answers from stdin until the session completes or input ends.
    async fn chat(&self, id: Id) -> Result<()> {
        let mut turn = self.planner.start_elaboration(&id).await?;
        self.renderer.render(&turn.to_string())?;

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        while !turn.complete {
            print!("> ");
            io::stdout().flush().context("Failed to flush stdout")?;

            let Some(line) = lines.next() else {
                break;
            };
            let answer = line.context("Failed to read answer")?;
            if answer.trim().is_empty() {
                continue;
            }

            turn = self
                .planner
                .submit_answer(&SubmitAnswer {
                    seed_id: id.id,
                    session_id: turn.session.session_id().map(String::from),
                    answer,
                })
                .await?;
            self.renderer.render(&turn.to_string())?;
        }

        if turn.complete {
            self.renderer.render(&format!(
                "\nRun `wp project convert {}` to build the project.\n",
                id.id
            ))?;
        }
        Ok(())
    }

    pub async fn handle_project_command(&self, command: ProjectCommands) -> Result<()> {
        match command {
            ProjectCommands::Convert(args) => {
                let result = self
                    .planner
                    .convert_seed(&args.into())
                    .await
                    .context("Failed to convert seed into a project")?;
                self.renderer.render(&result.to_string())
            }
            ProjectCommands::Show(args) => self.show_project(args).await,
            ProjectCommands::List(args) => {
                let projects = self.planner.list_projects(&args.into()).await?;
                self.renderer
                    .render(&ProjectSummaries(projects).to_string())
            }
        }
    }

    async fn show_project(&self, args: ShowProjectArgs) -> Result<()> {
        let project = self
            .planner
            .get_project(&Id { id: args.id })
            .await?
            .ok_or(PlannerError::ProjectNotFound { id: args.id })?;

        if args.json {
            let json =
                serde_json::to_string_pretty(&project).context("Failed to serialize project")?;
            println!("{json}");
            Ok(())
        } else {
            self.renderer.render(&project.to_string())
        }
    }
}
