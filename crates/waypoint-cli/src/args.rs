//! Command-line argument definitions.
//!
//! Clap-specific wrappers live here and convert into the interface-agnostic
//! parameter types of `waypoint_core::params` via `From`.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;
use waypoint_core::params::{CreateSeed, Id, ListProjects, SubmitAnswer};

/// Turn a youth exchange idea into a scheduled, budgeted project plan
///
/// Start with a seed (a one-line idea), answer the elaboration questions,
/// then convert the finished specification into a project with a timeline,
/// a budget split and phases with checklists.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to a JSON planning configuration. Defaults to
    /// $XDG_CONFIG_HOME/waypoint/config.json when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Plan relative to this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<Date>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage project seeds
    #[command(alias = "s")]
    Seed {
        #[command(subcommand)]
        command: SeedCommands,
    },
    /// Elaborate a seed into a full specification
    #[command(alias = "e")]
    Elaborate {
        #[command(subcommand)]
        command: ElaborateCommands,
    },
    /// Convert seeds into projects and inspect them
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

/// Create a new seed
#[derive(ClapArgs)]
pub struct AddSeedArgs {
    /// Short title of the exchange idea
    pub title: String,
    #[arg(short, long, help = "Free-text description of the idea")]
    pub description: Option<String>,
    #[arg(short, long, help = "Rough number of participants")]
    pub participants: Option<u32>,
    #[arg(long, help = "Rough duration of the exchange in days")]
    pub days: Option<u32>,
}

impl From<AddSeedArgs> for CreateSeed {
    fn from(val: AddSeedArgs) -> Self {
        CreateSeed {
            title: val.title,
            description: val.description,
            estimated_participants: val.participants,
            estimated_duration_days: val.days,
        }
    }
}

/// Refer to a seed or project by ID
#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum SeedCommands {
    /// Create a new seed
    #[command(alias = "a")]
    Add(AddSeedArgs),
    /// List all seeds
    #[command(alias = "l")]
    List,
    /// Show one seed
    #[command(alias = "s")]
    Show(IdArgs),
}

/// Answer the question the session is currently asking
#[derive(ClapArgs)]
pub struct AnswerArgs {
    #[arg(help = "ID of the seed being elaborated")]
    pub seed_id: u64,
    #[arg(required = true, num_args = 1.., help = "The answer, in your own words")]
    pub answer: Vec<String>,
    #[arg(long, help = "Session the answer belongs to; rejected if stale")]
    pub session: Option<String>,
}

impl From<AnswerArgs> for SubmitAnswer {
    fn from(val: AnswerArgs) -> Self {
        SubmitAnswer {
            seed_id: val.seed_id,
            session_id: val.session,
            answer: val.answer.join(" "),
        }
    }
}

#[derive(Subcommand)]
pub enum ElaborateCommands {
    /// Start or resume the session for a seed
    Start(IdArgs),
    /// Submit one answer
    #[command(alias = "a")]
    Answer(AnswerArgs),
    /// Show completeness and the pending question
    Status(IdArgs),
    /// Answer questions interactively until the specification is complete
    Chat(IdArgs),
}

/// Show a project
#[derive(ClapArgs)]
pub struct ShowProjectArgs {
    #[arg(help = "Unique identifier of the project")]
    pub id: u64,
    #[arg(long, help = "Print the project as JSON")]
    pub json: bool,
}

/// List projects
#[derive(ClapArgs)]
pub struct ListProjectsArgs {
    #[arg(long, help = "Only projects converted from this seed")]
    pub seed: Option<u64>,
}

impl From<ListProjectsArgs> for ListProjects {
    fn from(val: ListProjectsArgs) -> Self {
        ListProjects { seed_id: val.seed }
    }
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Synthesize a project from an elaborated seed
    #[command(alias = "c")]
    Convert(IdArgs),
    /// Show a project with its phases
    #[command(alias = "s")]
    Show(ShowProjectArgs),
    /// List projects
    #[command(alias = "l")]
    List(ListProjectsArgs),
}
