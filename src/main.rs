use clap::Parser;
use std::process;

use millcal::cli::commands::{Cli, Commands};
use millcal::cli::{self, item::AddArgs, Context};
use millcal::logging;
use millcal::schedule::Action;

fn main() {
    let cli_args = Cli::parse();
    if let Err(e) = logging::init_tracing(cli_args.verbose, cli_args.quiet) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
    let ctx = Context {
        json: cli_args.json,
        today: cli_args.today.clone(),
    };

    let exit_code = match cli_args.command {
        Commands::Init { seed, days, empty, move_policy } => {
            cli::init::run(&ctx, seed, days, empty, move_policy.as_deref())
        }
        Commands::Generate { seed, days } => cli::board::run_generate(&ctx, seed, days),
        Commands::Board { expand } => cli::board::run_board(&ctx, expand.as_deref()),
        Commands::List { tab } => cli::board::run_list(&ctx, &tab),
        Commands::Status => cli::board::run_status(&ctx),
        Commands::Add {
            title,
            date,
            category,
            time,
            details,
            priority,
            department,
            assign,
            deadline,
        } => cli::item::run_add(
            &ctx,
            AddArgs { title, date, category, time, details, priority, department, assign, deadline },
        ),
        Commands::Show { id } => cli::item::run_show(&ctx, &id),
        Commands::Confirm { id } => cli::item::run_transition(&ctx, &id, Action::Confirm),
        Commands::Complete { id } => cli::item::run_transition(&ctx, &id, Action::Complete),
        Commands::Cancel { id } => cli::item::run_transition(&ctx, &id, Action::Cancel),
        Commands::Move { id, to, from } => cli::item::run_move(&ctx, &id, &to, from.as_deref()),
        Commands::Staff { department } => cli::staff::run(&ctx, department.as_deref()),
    };

    process::exit(exit_code);
}
