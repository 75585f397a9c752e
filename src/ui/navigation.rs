//! Which section is visible, and which renderer fills it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiClient, Transport};

use super::{dashboard, employees, materials, projects, works, LoadFuture, Section};

/// A section renderer: fetch through the client, produce the section content.
pub type Loader<T> = fn(Arc<ApiClient<T>>, Option<String>) -> LoadFuture;

#[derive(Error, Debug, PartialEq)]
pub enum NavigationError {
    #[error("no renderer registered for section '{}'", .0.id())]
    MissingRenderer(Section),

    #[error("section '{}' has more than one renderer", .0.id())]
    DuplicateRenderer(Section),
}

/// Maps every section to exactly one renderer.
pub struct DispatchTable<T> {
    loaders: Vec<Loader<T>>,
}

impl<T: Transport> DispatchTable<T> {
    /// Validates the entries against [`Section::ALL`].
    pub fn new(entries: Vec<(Section, Loader<T>)>) -> Result<Self, NavigationError> {
        let mut by_section = HashMap::new();
        for (section, loader) in entries {
            if by_section.insert(section, loader).is_some() {
                return Err(NavigationError::DuplicateRenderer(section));
            }
        }

        let loaders = Section::ALL
            .iter()
            .map(|section| {
                by_section
                    .remove(section)
                    .ok_or(NavigationError::MissingRenderer(*section))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { loaders })
    }

    pub fn standard() -> Result<Self, NavigationError> {
        Self::new(vec![
            (Section::Dashboard, dashboard::load::<T> as Loader<T>),
            (Section::Works, works::load::<T> as Loader<T>),
            (Section::Employees, employees::load::<T> as Loader<T>),
            (Section::Materials, materials::load::<T> as Loader<T>),
            (Section::Projects, projects::load::<T> as Loader<T>),
        ])
    }

    pub fn loader(&self, section: Section) -> Loader<T> {
        self.loaders[section.index()]
    }
}

/// Identifies one activation of a section. Results carrying an outdated
/// ticket belong to a view the user already left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub section: Section,
    pub token: u64,
}

pub struct Navigator {
    active: Section,
    token: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            active: Section::Dashboard,
            token: 0,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Make `section` the visible one. Re-activating the current section is
    /// allowed and also issues a fresh ticket.
    pub fn activate(&mut self, section: Section) -> Ticket {
        self.active = section;
        self.token += 1;
        Ticket {
            section,
            token: self.token,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.token == self.token && ticket.section == self.active
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeTransport;

    #[test]
    fn starts_on_dashboard() {
        assert_eq!(Navigator::new().active(), Section::Dashboard);
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let mut nav = Navigator::new();
        let works = nav.activate(Section::Works);
        let employees = nav.activate(Section::Employees);

        assert!(!nav.is_current(&works));
        assert!(nav.is_current(&employees));
        assert_eq!(nav.active(), Section::Employees);
    }

    #[test]
    fn reselecting_issues_a_new_ticket() {
        let mut nav = Navigator::new();
        let first = nav.activate(Section::Works);
        let second = nav.activate(Section::Works);

        assert_ne!(first, second);
        assert!(!nav.is_current(&first));
        assert!(nav.is_current(&second));
    }

    #[test]
    fn standard_table_covers_every_section() {
        assert!(DispatchTable::<FakeTransport>::standard().is_ok());
    }

    #[test]
    fn missing_renderer_is_rejected() {
        let result = DispatchTable::<FakeTransport>::new(vec![
            (Section::Dashboard, dashboard::load::<FakeTransport> as Loader<FakeTransport>),
            (Section::Works, works::load::<FakeTransport> as Loader<FakeTransport>),
        ]);

        assert_eq!(
            result.err(),
            Some(NavigationError::MissingRenderer(Section::Employees))
        );
    }

    #[test]
    fn duplicate_renderer_is_rejected() {
        let result = DispatchTable::<FakeTransport>::new(vec![
            (Section::Works, works::load::<FakeTransport> as Loader<FakeTransport>),
            (Section::Works, works::load::<FakeTransport> as Loader<FakeTransport>),
        ]);

        assert_eq!(
            result.err(),
            Some(NavigationError::DuplicateRenderer(Section::Works))
        );
    }
}
