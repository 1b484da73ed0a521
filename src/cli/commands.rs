use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "millcal",
    version = VERSION,
    about = "Seven-day production schedule board for a textile mill",
    after_help = "\
NOTE:
  Board data lives in <project>/.millcal/millcal.db, found by walking up from
  the current directory. Run `millcal init` before any other command.

EXIT CODES:
  0  Success
  1  Error (validation, invalid transition, unknown item, storage, etc.)

STATUS RULES:
  pending   → confirmed | completed | cancelled
  confirmed → completed | cancelled
  overdue   → completed | cancelled
  completed and cancelled are final.

BEHAVIOR NOTES:
  `generate` replaces every item on the board; nothing is merged.
  `move` to the item's current day does nothing and succeeds.
  With move_policy=remint a moved item gets <id>-moved-<ulid>; the old id
  and its prefixes stop resolving to it.
  --days / window_days is capped at 366.
  Each change is saved only if nobody else saved in between
  (VERSION_CONFLICT otherwise; re-run the command)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize millcal in this directory and fill the board with demo items
    Init {
        /// Seed for the demo generator
        #[arg(long)]
        seed: Option<u64>,
        /// Days to generate, starting today
        #[arg(long)]
        days: Option<u32>,
        /// Start with an empty board
        #[arg(long)]
        empty: bool,
        /// Item ids on move: preserve | remint
        #[arg(long)]
        move_policy: Option<String>,
    },

    /// Replace the board with freshly generated demo items
    Generate {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        days: Option<u32>,
    },

    /// Show the day-by-day board of active items
    Board {
        /// Show full details for this day (YYYY-MM-DD)
        #[arg(long)]
        expand: Option<String>,
    },

    /// List items in one status tab
    List {
        /// active | completed | cancelled
        #[arg(long, default_value = "active")]
        tab: String,
    },

    /// Show summary counts
    Status,

    /// Add an item (starts as pending)
    Add {
        /// Item title
        title: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// delivery | production | payment | meeting | cutting | quality | task | event
        #[arg(long = "type")]
        category: Option<String>,
        /// "hh:mm AM/PM" or "HH:MM"
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        details: Option<String>,
        /// low | medium | high
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        department: Option<String>,
        /// Employee id to assign (see `millcal staff`)
        #[arg(long)]
        assign: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Show item details and the actions available for it
    Show {
        /// Item ID or prefix
        id: String,
    },

    /// Confirm an item (pending → confirmed)
    Confirm { id: String },

    /// Complete an item (pending|confirmed|overdue → completed)
    Complete { id: String },

    /// Cancel an item (pending|confirmed|overdue → cancelled)
    Cancel { id: String },

    /// Move an item to another day
    Move {
        /// Item ID or prefix
        id: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Day the item is expected on; defaults to wherever it is
        #[arg(long)]
        from: Option<String>,
    },

    /// List staff that items can be assigned to
    Staff {
        #[arg(long)]
        department: Option<String>,
    },
}
