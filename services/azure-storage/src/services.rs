use std::fmt;

/// A storage service an account SAS can grant access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// `b`
    Blob,
    /// `q`
    Queue,
    /// `t`
    Table,
    /// `f`
    File,
}

impl Service {
    /// Look up a service by its wire code.
    pub fn from_code(code: char) -> Option<Service> {
        match code {
            'b' => Some(Service::Blob),
            'q' => Some(Service::Queue),
            't' => Some(Service::Table),
            'f' => Some(Service::File),
            _ => None,
        }
    }

    /// Wire code of this service.
    pub fn code(&self) -> char {
        match self {
            Service::Blob => 'b',
            Service::Queue => 'q',
            Service::Table => 't',
            Service::File => 'f',
        }
    }
}

/// Signed services (`ss`) of an account SAS.
///
/// Services keep the order they were given in, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedServices(Vec<Service>);

impl SignedServices {
    /// Parse services, dropping unknown characters.
    pub fn parse(services: &str) -> Self {
        Self(services.chars().filter_map(Service::from_code).collect())
    }

    /// Whether no service has been parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether `service` is granted.
    pub fn contains(&self, service: Service) -> bool {
        self.0.contains(&service)
    }

    /// The services in the order given.
    pub fn as_slice(&self) -> &[Service] {
        &self.0
    }
}

impl fmt::Display for SignedServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for service in &self.0 {
            write!(f, "{}", service.code())?;
        }
        Ok(())
    }
}
