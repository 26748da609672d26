//! helpdesk - support ticket tracking for a repair desk
//!
//! This is the main entry point for the helpdesk CLI application.
//! It handles command-line argument parsing and dispatches to the appropriate
//! command handlers.

use clap::Parser;
use helpdesk::cli::handlers::{
    HandlerContext, UpdateArgs, handle_analyze_command, handle_hash_password_command,
    handle_list_command, handle_report_command, handle_show_command, handle_submit_command,
    handle_update_command,
};
use helpdesk::cli::{Cli, Commands, OutputFormatter};
use helpdesk::core::NewTicket;
use helpdesk::error::{HelpdeskError, Result};
use std::process;
use tracing_subscriber::EnvFilter;

/// Main entry point for the helpdesk CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    let cli = Cli::parse();

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    init_logging(cli.verbose);

    // Needs neither configuration nor the ticket file
    let command = match cli.command {
        Commands::HashPassword { password } => {
            return handle_hash_password_command(password, formatter);
        },
        command => command,
    };

    let ctx = HandlerContext::new(cli.config.as_deref(), cli.data.as_deref())?;
    dispatch_command(command, &ctx, formatter)
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, warnings by default
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch_command(
    command: Commands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Submit {
            name,
            phone,
            email,
            device,
            description,
        } => handle_submit_command(
            NewTicket {
                name,
                phone,
                email,
                device_name: device,
                description,
            },
            ctx,
            formatter,
        ),
        Commands::List { status } => handle_list_command(status.as_deref(), ctx, formatter),
        Commands::Show { ticket } => handle_show_command(&ticket, ctx, formatter),
        Commands::Update {
            ticket,
            status,
            priority,
            assign,
            note,
            author,
            username,
            password,
        } => handle_update_command(
            UpdateArgs {
                ticket,
                status,
                priority,
                assign,
                note,
                author,
                username,
                password,
            },
            ctx,
            formatter,
        ),
        Commands::Report { output } => handle_report_command(output.as_deref(), ctx, formatter),
        Commands::Analyze { input } => handle_analyze_command(input.as_deref(), ctx, formatter),
        Commands::HashPassword { password } => handle_hash_password_command(password, formatter),
    }
}

/// Handle errors and display them to the user
///
/// Validation errors list every offending field; in JSON mode the error is
/// also emitted as a structured object on stdout.
fn handle_error(error: &HelpdeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    if formatter.is_json() {
        let fields: Vec<_> = error
            .fields()
            .iter()
            .map(|f| serde_json::json!({ "field": f.field, "message": f.message }))
            .collect();
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "kind": format!("{:?}", error.kind()),
            "fields": fields,
            "recoverable": error.is_recoverable(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
