use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::sign_in_commands::RecordSignInCommand;
use signin_domain::shared::DomainError;
use signin_domain::sign_in::{SignInDate, SignInMonth};

use super::state::AppState;

/// Monthly sign-in bitmaps and streaks
#[derive(Debug, Parser)]
#[command(name = "signin")]
#[command(about = "Record daily sign-ins and report streaks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SIGNIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, env = "SIGNIN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a sign-in
    SignIn {
        user_id: String,

        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<SignInDate>,
    },

    /// Show the current streak
    Streak {
        user_id: String,

        /// Day the streak ends on (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<SignInDate>,
    },

    /// Show every day of a month
    Calendar {
        user_id: String,

        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: SignInMonth,
    },
}

/// Run one command against `state` and return the JSON to print
pub async fn execute(state: &AppState, command: Commands) -> Result<String> {
    match command {
        Commands::SignIn { user_id, date } => {
            let date = resolve_date(date)?;
            let result = state
                .record_sign_in_handler
                .handle(RecordSignInCommand {
                    user_id,
                    year: date.year(),
                    month: date.month().month(),
                    day: date.day(),
                })
                .await?;
            to_json(&result)
        }
        Commands::Streak { user_id, date } => {
            let date = resolve_date(date)?;
            let summary = state
                .streak_queries
                .get_streak_summary(&user_id, date.year(), date.month().month(), date.day())
                .await?;
            to_json(&summary)
        }
        Commands::Calendar { user_id, month } => {
            let calendar = state
                .streak_queries
                .get_calendar(&user_id, month.year(), month.month())
                .await?;
            to_json(&calendar)
        }
    }
}

/// The caller's local calendar day unless one was given
fn resolve_date(date: Option<SignInDate>) -> Result<SignInDate, DomainError> {
    match date {
        Some(date) => Ok(date),
        None => {
            let today = Local::now().date_naive();
            SignInDate::new(today.year(), today.month(), today.day())
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
