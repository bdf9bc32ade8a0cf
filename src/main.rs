//! Command-line driver for the HipChat client.
//!
//! One subcommand per API operation; results are printed as JSON and the
//! process exit code reflects the flat success/failure contract of the
//! library.
//!
//! # Configuration
//!
//! Credentials come from a YAML profile (see [`hipchat::config`]):
//!
//! ```yaml
//! hipchat:
//!   api_key: peWcBiMOS9HrZG15peWcBiMOS9HrZG15
//!   api_version: v1
//! ```
//!
//! `HIPCHAT_API_KEY` / `HIPCHAT_API_VERSION` environment variables override
//! the file, and `--api-key`/`--api-version` override both for a single
//! invocation.
//!
//! # Usage
//!
//! ```bash
//! hipchat --config hipchat.yaml list-rooms
//! hipchat --config hipchat.yaml find-user "Thomas Hatch"
//! hipchat --config hipchat.yaml send-message "Development Room" \
//!     "Build is done" "Build Server" --color green --notify
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;

use hipchat::{Credential, FigmentResolver, HipchatClient};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file holding the `hipchat:` profile.
    #[arg(short, long, default_value = "hipchat.yaml")]
    config: String,

    /// API key override; must be given together with --api-version.
    #[arg(long)]
    api_key: Option<String>,

    /// API version override (`v1` or `v2`); must be given together with --api-key.
    #[arg(long)]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// The available API operations.
#[derive(Subcommand, Debug)]
enum Command {
    /// List all rooms.
    ListRooms,
    /// List all users.
    ListUsers,
    /// Find a room by exact name.
    FindRoom {
        /// The room name.
        name: String,
    },
    /// Find a user by exact name.
    FindUser {
        /// The user name.
        name: String,
    },
    /// Send a message to a room.
    SendMessage {
        /// The room id or room name; either works.
        room_id: String,
        /// The message text (clamped to 10 000 characters).
        message: String,
        /// Who the message is from (clamped to 15 characters).
        from: String,
        /// Background color for the message.
        #[arg(long, default_value = "yellow")]
        color: String,
        /// Trigger a room notification.
        #[arg(long)]
        notify: bool,
    },
}

fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    // An override credential is all-or-nothing
    let credential = match (&args.api_key, &args.api_version) {
        (Some(api_key), Some(api_version)) => match api_version.parse() {
            Ok(api_version) => Some(Credential {
                api_key: api_key.clone(),
                api_version,
            }),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => None,
        _ => {
            error!("--api-key and --api-version must be given together");
            return ExitCode::FAILURE;
        }
    };
    let credential = credential.as_ref();

    let resolver = FigmentResolver::from_file(&args.config);
    let client = HipchatClient::new(resolver);

    let outcome = match &args.command {
        Command::ListRooms => client.list_rooms(credential).and_then(print_json),
        Command::ListUsers => client.list_users(credential).and_then(print_json),
        Command::FindRoom { name } => client.find_room(name, credential).and_then(print_json),
        Command::FindUser { name } => client.find_user(name, credential).and_then(print_json),
        Command::SendMessage {
            room_id,
            message,
            from,
            color,
            notify,
        } => client
            .send_message(room_id, message, from, color, *notify, credential)
            .then_some(()),
    };

    match outcome {
        Some(()) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    }
}

/// Prints a payload as pretty JSON; serialization trouble counts as failure.
fn print_json<T: serde::Serialize>(value: T) -> Option<()> {
    match serde_json::to_string_pretty(&value) {
        Ok(rendered) => {
            println!("{}", rendered);
            Some(())
        }
        Err(e) => {
            error!("failed to render result: {}", e);
            None
        }
    }
}
