//! Top-level entry point that opens every entity repository together and
//! hosts the few operations that touch more than one kind.
//!
//! The registry is opened via [`RegistryBuilder`]. Cross-kind operations
//! here are bookkeeping only: nothing enforces referential integrity, so a
//! venue may be deleted while events still name it.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{Client, Employee, Event, Guest, Supplier, Venue};
use crate::entity::{Entity, require};
use crate::error::Result;
use crate::fields::Fields;
use crate::id::Id;
use crate::pricing::{Quote, format_amount, quote};
use crate::repository::Repository;
use crate::storage::DataLayout;

/// An entity kind held by the [`Registry`].
///
/// Lets generic callers (such as a CLI dispatching on a kind name) reach
/// the right repository without matching on every kind themselves.
pub trait RegistryEntity: Entity {
    fn repo(registry: &Registry) -> &Repository<Self>;
    fn repo_mut(registry: &mut Registry) -> &mut Repository<Self>;
}

macro_rules! registry_entity {
    ($ty:ty, $field:ident) => {
        impl RegistryEntity for $ty {
            fn repo(registry: &Registry) -> &Repository<Self> {
                &registry.$field
            }

            fn repo_mut(registry: &mut Registry) -> &mut Repository<Self> {
                &mut registry.$field
            }
        }
    };
}

registry_entity!(Employee, employees);
registry_entity!(Client, clients);
registry_entity!(Supplier, suppliers);
registry_entity!(Guest, guests);
registry_entity!(Event, events);
registry_entity!(Venue, venues);

/// All six repositories of the events company, opened from one directory.
#[derive(Debug)]
pub struct Registry {
    layout: DataLayout,
    employees: Repository<Employee>,
    clients: Repository<Client>,
    suppliers: Repository<Supplier>,
    guests: Repository<Guest>,
    events: Repository<Event>,
    venues: Repository<Venue>,
}

impl Registry {
    /// Start configuring a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Open a registry rooted at `data_dir` with default settings.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().data_dir(data_dir).open()
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// The repository for entity kind `E`.
    pub fn repo<E: RegistryEntity>(&self) -> &Repository<E> {
        E::repo(self)
    }

    /// Mutable access to the repository for entity kind `E`.
    pub fn repo_mut<E: RegistryEntity>(&mut self) -> &mut Repository<E> {
        E::repo_mut(self)
    }

    /// Record counts per kind, in a fixed display order.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        vec![
            (Employee::COLLECTION, self.employees.len()),
            (Client::COLLECTION, self.clients.len()),
            (Supplier::COLLECTION, self.suppliers.len()),
            (Guest::COLLECTION, self.guests.len()),
            (Event::COLLECTION, self.events.len()),
            (Venue::COLLECTION, self.venues.len()),
        ]
    }

    /// Insert an event and list it on the schedule of the venue it names.
    ///
    /// The venue is matched by name, ignoring case and surrounding
    /// whitespace. An event naming no known venue is still stored.
    pub fn schedule_event(&mut self, event: Event) -> Result<Id> {
        let venue = self.venue_named(&event.venue);
        let id = self.events.insert(event)?;
        if let Some(venue_id) = venue {
            self.venues.modify(venue_id, |v| v.add_event(id))?;
            tracing::info!(event_id = id, venue_id, "event added to venue schedule");
        }
        Ok(id)
    }

    /// Update an event and move it to the schedule of the venue it now names.
    ///
    /// An edit that keeps the same venue leaves the schedule order alone.
    pub fn update_event(&mut self, id: Id, fields: &Fields) -> Result<()> {
        let before = self.venue_named(&self.events.find(id)?.venue);
        self.events.update(id, fields)?;
        let after = self.venue_named(&self.events.find(id)?.venue);

        if before != after {
            self.unlist_event(id)?;
        }
        let unlisted = after.filter(|venue_id| {
            self.venues
                .get(*venue_id)
                .is_some_and(|v| !v.events.contains(&id))
        });
        if let Some(venue_id) = unlisted {
            self.venues.modify(venue_id, |v| v.add_event(id))?;
            tracing::info!(event_id = id, venue_id, "event added to venue schedule");
        }
        Ok(())
    }

    /// Delete an event and drop it from every venue schedule.
    pub fn cancel_event(&mut self, id: Id) -> Result<Event> {
        let event = self.events.delete(id)?;
        self.unlist_event(id)?;
        Ok(event)
    }

    /// Events booked at a venue, in schedule order.
    ///
    /// Schedule entries whose event no longer exists are skipped.
    pub fn venue_schedule(&self, venue_id: Id) -> Result<Vec<(Id, &Event)>> {
        let venue = self.venues.find(venue_id)?;
        Ok(venue
            .events
            .iter()
            .filter_map(|id| self.events.get(*id).map(|e| (*id, e)))
            .collect())
    }

    /// Price a booking for a guest and store the total on the guest record.
    ///
    /// The stored value uses the display form, e.g. `$1200.00`.
    pub fn quote_guest<I, S>(&mut self, guest_id: Id, event_type: &str, services: I) -> Result<Quote>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.guests.find(guest_id)?;
        let quote = quote(event_type, services);
        let total = format_amount(quote.total);
        self.guests.modify(guest_id, |g| g.total_cost = total)?;
        Ok(quote)
    }

    /// Tag a client with an event type it is interested in.
    ///
    /// Tags already present are left as they are.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`](crate::RepositoryError::NotFound) for an
    /// unknown client, or a validation error for a blank tag.
    pub fn tag_client(&mut self, client_id: Id, tag: &str) -> Result<()> {
        let tag = tag.trim();
        require("event_types", tag)?;
        self.clients.modify(client_id, |c| c.add_event_type(tag))
    }

    /// Remove an event-type tag from a client.
    ///
    /// # Returns
    ///
    /// `true` if the client carried the tag.
    pub fn untag_client(&mut self, client_id: Id, tag: &str) -> Result<bool> {
        let tag = tag.trim();
        if !self.clients.find(client_id)?.event_types.iter().any(|t| t == tag) {
            return Ok(false);
        }
        self.clients.modify(client_id, |c| {
            c.remove_event_type(tag);
        })?;
        Ok(true)
    }

    fn venue_named(&self, name: &str) -> Option<Id> {
        let wanted = name.trim();
        self.venues
            .iter()
            .find(|(_, v)| v.name.trim().eq_ignore_ascii_case(wanted))
            .map(|(id, _)| id)
    }

    fn unlist_event(&mut self, event_id: Id) -> Result<()> {
        let listed: Vec<Id> = self
            .venues
            .search(|v| v.events.contains(&event_id))
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        for venue_id in listed {
            self.venues.modify(venue_id, |v| {
                v.remove_event(event_id);
            })?;
        }
        Ok(())
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    data_dir: Option<PathBuf>,
    create_dir: bool,
}

impl RegistryBuilder {
    /// Create a builder with no configuration.
    ///
    /// Without a [`data_dir`](RegistryBuilder::data_dir), [`open`](RegistryBuilder::open)
    /// falls back to [`Config::from_env`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory holding the collection files.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Take the data directory from a [`Config`].
    pub fn config(self, config: &Config) -> Self {
        self.data_dir(config.data_dir.clone())
    }

    /// Create the data directory at open time instead of on first save.
    pub fn create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    /// Load every collection and return the ready registry.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Io`](crate::RepositoryError::Io) if any existing
    /// collection file cannot be read or parsed, or the directory cannot be
    /// created.
    pub fn open(self) -> Result<Registry> {
        let data_dir = self
            .data_dir
            .unwrap_or_else(|| Config::from_env().data_dir);
        if self.create_dir {
            std::fs::create_dir_all(&data_dir)?;
        }

        let layout = DataLayout::new(data_dir);
        let registry = Registry {
            employees: Repository::open(&layout)?,
            clients: Repository::open(&layout)?,
            suppliers: Repository::open(&layout)?,
            guests: Repository::open(&layout)?,
            events: Repository::open(&layout)?,
            venues: Repository::open(&layout)?,
            layout,
        };

        tracing::debug!(
            data_dir = %registry.layout.base_dir().display(),
            "registry opened"
        );
        Ok(registry)
    }
}
