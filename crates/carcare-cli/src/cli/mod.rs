//! CLI command definitions for the `carcare` binary.
//!
//! Uses clap derive macros for argument parsing. Customer commands sit at
//! the top level (`carcare services`, `carcare book`); staff commands live
//! under `carcare admin`.

pub mod admin;
pub mod book;
pub mod catalog;

#[cfg(test)]
mod offline;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use carcare_types::booking::BookingStatus;

/// Book car care at home, and manage bookings.
#[derive(Parser)]
#[command(name = "carcare", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend base URL (overrides config.toml).
    #[arg(long, global = true, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the service catalog.
    Services,

    /// List the packages offered for a service.
    Packages {
        /// Service name, as shown by `carcare services`.
        service: String,
    },

    /// List the optional add-ons.
    Addons,

    /// Get an instant price estimate.
    Quote(QuoteArgs),

    /// Book a service (interactive unless every required flag is given).
    Book(BookArgs),

    /// Staff commands: list bookings and change their status.
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// The selection a quote is computed for.
#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    /// Service name.
    #[arg(long)]
    pub service: String,

    /// Package name.
    #[arg(long)]
    pub package: Option<String>,

    /// Add-on code (repeatable): pickup_drop, sanitization, engine_check.
    #[arg(long = "addon")]
    pub addons: Vec<String>,

    /// Latitude of the service address.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude of the service address.
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BookArgs {
    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Service address.
    #[arg(long)]
    pub address: Option<String>,

    /// Vehicle make, e.g. "Maruti".
    #[arg(long)]
    pub make: Option<String>,

    /// Vehicle model, e.g. "Swift".
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub service: Option<String>,

    #[arg(long)]
    pub package: Option<String>,

    /// Add-on code (repeatable).
    #[arg(long = "addon")]
    pub addons: Vec<String>,

    /// Preferred date (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<String>,

    /// Preferred time (HH:MM).
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Fetch an instant quote and attach it to the booking.
    #[arg(long)]
    pub quote: bool,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List bookings, newest first as the backend returns them.
    #[command(alias = "ls")]
    List {
        /// Only show bookings in this status.
        #[arg(long)]
        status: Option<BookingStatus>,
    },

    /// Move a booking to another status.
    SetStatus {
        /// Booking id.
        id: String,

        /// Target status: pending, confirmed, completed, cancelled.
        status: BookingStatus,
    },
}

/// A steady-ticking spinner with `msg`.
pub(crate) fn spinner(msg: &'static str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

/// Two-column `Label:  value` line, the layout every detail view uses.
pub(crate) fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {}  {}", style(format!("{label}:")).bold(), value);
}

/// Informational one-liner with the blue `i` marker.
pub(crate) fn print_info(message: impl std::fmt::Display) {
    println!();
    println!("  {} {}", style("i").blue().bold(), message);
    println!();
}
