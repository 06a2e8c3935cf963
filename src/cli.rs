use anyhow::Result;
use clap::{Parser, Subcommand};
use compute::BookingAction;
use rust_decimal::Decimal;

pub mod commands;

use crate::config::StoreConfig;
use crate::notes::FileNoteStore;
use crate::store::RestTableStore;

#[derive(Parser)]
#[command(name = "counsel")]
#[command(about = "Counselor dashboard operations from the command line")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreConfig,

    /// Id of the signed-in counselor's user account
    #[arg(long, env = "COUNSEL_USER_ID")]
    pub user_id: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly revenue from completed payments
    Revenue,
    /// Clients with their sessions and private notes
    Clients,
    /// Write the private note kept for a client
    Note {
        #[arg(long)]
        client: String,
        #[arg(long)]
        text: String,
    },
    /// List bookings or change their status
    #[command(subcommand)]
    Bookings(BookingsCommand),
    /// Manage weekly availability slots
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Show or edit the counselor profile
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand)]
pub enum BookingsCommand {
    List,
    /// Apply confirm, complete or cancel to a booking
    Set {
        #[arg(long)]
        booking: String,
        #[arg(long)]
        action: BookingAction,
    },
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    List,
    Add {
        /// 0 = Sunday .. 6 = Saturday
        #[arg(long)]
        day: u8,
        #[arg(long, default_value = "09:00")]
        start: String,
        #[arg(long, default_value = "18:00")]
        end: String,
    },
    /// Flip the availability of a slot
    Toggle {
        #[arg(long)]
        slot: String,
    },
    Delete {
        #[arg(long)]
        slot: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    AddSpecialty { tag: String },
    RemoveSpecialty { tag: String },
    SetRate { rate: Decimal },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let notes = FileNoteStore::new(&self.store.notes_path);
        let store = RestTableStore::new(self.store);
        let user_id = self.user_id.as_str();

        let output = match self.command {
            Commands::Revenue => commands::revenue::run(&store, user_id).await?,
            Commands::Clients => commands::clients::list(&store, &notes, user_id).await?,
            Commands::Note { client, text } => commands::clients::set_note(&notes, &client, &text)?,
            Commands::Bookings(cmd) => commands::bookings::run(&store, user_id, cmd).await?,
            Commands::Schedule(cmd) => commands::schedule::run(&store, user_id, cmd).await?,
            Commands::Profile(cmd) => commands::profile::run(&store, user_id, cmd).await?,
        };
        println!("{}", output);
        Ok(())
    }
}
