//! Command-line interface for helpdesk
//!
//! The `helpdesk` binary drives a [`HelpDesk`](crate::desk::HelpDesk) backed
//! by the configured JSON ticket file. Each invocation is a separate process,
//! so `update` logs in, applies its patch, and logs out again.

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Support ticket tracking for a repair desk
#[derive(Parser, Debug)]
#[command(name = "helpdesk", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to config.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ticket data file, overriding the configured one
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new customer ticket
    Submit {
        /// Customer name
        #[arg(long)]
        name: String,

        /// Customer phone number
        #[arg(long)]
        phone: String,

        /// Customer email address
        #[arg(long)]
        email: String,

        /// Device that needs service
        #[arg(long)]
        device: String,

        /// Problem description
        #[arg(long)]
        description: String,
    },

    /// List tickets in submission order
    List {
        /// Only show tickets with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one ticket with its notes
    Show {
        /// Ticket ID or unique ID prefix
        ticket: String,
    },

    /// Update a ticket as staff
    Update {
        /// Ticket ID or unique ID prefix
        ticket: String,

        /// New status (new, in-progress, resolved, closed)
        #[arg(short, long)]
        status: Option<String>,

        /// New priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Assign to a staff member; an empty value clears the assignment
        #[arg(long)]
        assign: Option<String>,

        /// Append a note
        #[arg(long)]
        note: Option<String>,

        /// Note author (defaults to the logged in user)
        #[arg(long, requires = "note")]
        author: Option<String>,

        /// Staff username (defaults to the configured account)
        #[arg(short, long)]
        username: Option<String>,

        /// Staff password; prompted for when not given
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Render the analysis report
    Report {
        /// Also save the report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the full ticket analysis as JSON
    Analyze {
        /// Analyse an exported ticket file instead of the data file
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Hash a staff password for the auth.password_hash setting
    HashPassword {
        /// Password to hash; prompted for when not given
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}
