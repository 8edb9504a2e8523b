//! Command-line front end for the events company records.
//!
//! Run with: `event-desk --help`

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use event_desk::{
    Client, Config, Employee, Entity, Event, Fields, Guest, Id, Registry, RegistryEntity,
    RepositoryError, Supplier, Venue,
};

/// Manage employees, clients, suppliers, guests, events and venues
#[derive(Parser)]
#[command(name = "event-desk")]
#[command(about = "Record keeping for an events company", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the collection files (overrides EVENT_DESK_DATA_DIR)
    #[arg(short, long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a record from key=value fields
    Add {
        kind: Kind,
        #[arg(value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// List every record of a kind
    List { kind: Kind },

    /// Show one record
    Show { kind: Kind, id: Id },

    /// Replace some fields of a record
    Update {
        kind: Kind,
        id: Id,
        #[arg(value_name = "FIELD=VALUE", value_parser = parse_assignment, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Delete a record
    Delete { kind: Kind, id: Id },

    /// Price an event type with optional services
    Quote {
        /// Event type, e.g. "Wedding" or "Themed Party"
        event_type: String,

        /// Services: Catering, Cleaning, Decorations
        services: Vec<String>,

        /// Store the total on this guest's record
        #[arg(short, long, value_name = "GUEST_ID")]
        guest: Option<Id>,
    },

    /// Show the events booked at a venue
    Schedule { venue_id: Id },

    /// Add or remove an event-type tag on a client
    Tag {
        client_id: Id,

        /// Event type, e.g. "Birthday"
        tag: String,

        /// Remove the tag instead of adding it
        #[arg(short, long)]
        remove: bool,
    },

    /// Count records per kind
    Summary,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    #[value(alias = "employees")]
    Employee,
    #[value(alias = "clients")]
    Client,
    #[value(alias = "suppliers")]
    Supplier,
    #[value(alias = "guests")]
    Guest,
    #[value(alias = "events")]
    Event,
    #[value(alias = "venues")]
    Venue,
}

/// Run `$body` with `$e` bound to the record type selected by `$kind`.
macro_rules! with_kind {
    ($kind:expr, $e:ident => $body:expr) => {
        match $kind {
            Kind::Employee => {
                type $e = Employee;
                $body
            }
            Kind::Client => {
                type $e = Client;
                $body
            }
            Kind::Supplier => {
                type $e = Supplier;
                $body
            }
            Kind::Guest => {
                type $e = Guest;
                $body
            }
            Kind::Event => {
                type $e = Event;
                $body
            }
            Kind::Venue => {
                type $e = Venue;
                $body
            }
        }
    };
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected FIELD=VALUE, got {raw:?}")),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn list<E: RegistryEntity>(registry: &Registry) -> Result<()> {
    let records: BTreeMap<Id, &E> = registry.repo::<E>().iter().collect();
    print_json(&records)
}

fn show<E: RegistryEntity>(registry: &Registry, id: Id) -> Result<()> {
    print_json(registry.repo::<E>().find(id)?)
}

fn add<E: RegistryEntity>(registry: &mut Registry, fields: &Fields) -> Result<Id> {
    Ok(registry.repo_mut::<E>().insert_fields(fields)?)
}

fn update<E: RegistryEntity>(registry: &mut Registry, id: Id, fields: &Fields) -> Result<()> {
    Ok(registry.repo_mut::<E>().update(id, fields)?)
}

fn delete<E: RegistryEntity>(registry: &mut Registry, id: Id) -> Result<()> {
    registry.repo_mut::<E>().delete(id)?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let mut registry = Registry::builder()
        .config(&config)
        .create_dir(true)
        .open()
        .with_context(|| format!("failed to open data in {}", config.data_dir.display()))?;

    match cli.command {
        Command::Add { kind, fields } => {
            let fields: Fields = fields.into_iter().collect();
            let id = match kind {
                // Events also go onto their venue's schedule.
                Kind::Event => {
                    fields.ensure_known(Event::FIELDS).map_err(RepositoryError::from)?;
                    let event = Event::from_fields(&fields).map_err(RepositoryError::from)?;
                    registry.schedule_event(event)?
                }
                _ => with_kind!(kind, E => add::<E>(&mut registry, &fields)?),
            };
            println!("{id}");
        }
        Command::List { kind } => with_kind!(kind, E => list::<E>(&registry)?),
        Command::Show { kind, id } => with_kind!(kind, E => show::<E>(&registry, id)?),
        Command::Update { kind, id, fields } => {
            let fields: Fields = fields.into_iter().collect();
            match kind {
                Kind::Event => registry.update_event(id, &fields)?,
                _ => with_kind!(kind, E => update::<E>(&mut registry, id, &fields)?),
            }
        }
        Command::Delete { kind, id } => match kind {
            Kind::Event => {
                registry.cancel_event(id)?;
            }
            _ => with_kind!(kind, E => delete::<E>(&mut registry, id)?),
        },
        Command::Quote {
            event_type,
            services,
            guest,
        } => {
            let quote = match guest {
                Some(guest_id) => registry.quote_guest(guest_id, &event_type, &services)?,
                None => event_desk::quote(&event_type, &services),
            };
            if quote.event_type.is_none() {
                tracing::warn!(event_type = %event_type, "unknown event type, base price is 0");
            }
            print_json(&quote)?;
        }
        Command::Schedule { venue_id } => {
            let schedule: BTreeMap<Id, &Event> =
                registry.venue_schedule(venue_id)?.into_iter().collect();
            print_json(&schedule)?;
        }
        Command::Tag {
            client_id,
            tag,
            remove,
        } => {
            if !remove {
                registry.tag_client(client_id, &tag)?;
            } else if !registry.untag_client(client_id, &tag)? {
                eprintln!("client {client_id} was not tagged {tag:?}");
            }
        }
        Command::Summary => {
            for (collection, count) in registry.summary() {
                println!("{collection:<10} {count}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if it exists (for EVENT_DESK_DATA_DIR)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<RepositoryError>() {
            // User mistakes: report plainly so the user can re-enter.
            Some(e) if e.is_validation() || e.is_not_found() => {
                eprintln!("{e}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
