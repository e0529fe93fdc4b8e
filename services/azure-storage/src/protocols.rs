use std::fmt;

/// A protocol permitted for requests made with the SAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `https`
    Https,
    /// `http`
    Http,
}

impl Protocol {
    /// Wire form of this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }

    fn index(&self) -> usize {
        match self {
            Protocol::Https => 0,
            Protocol::Http => 1,
        }
    }
}

/// Signed protocols (`spr`) of an account SAS.
///
/// Either `https` or `https,http`, HTTP only is never permitted.
///
/// - [Specifying the HTTP protocol](https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas#specifying-the-http-protocol)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedProtocols {
    has_values: bool,
    /// `https` always comes first.
    protocols: [Option<Protocol>; 2],
}

impl SignedProtocols {
    /// HTTPS only.
    pub fn https_only() -> Self {
        Self {
            has_values: true,
            protocols: [Some(Protocol::Https), None],
        }
    }

    /// Both HTTPS and HTTP, used when HTTP only is requested.
    pub fn https_and_http() -> Self {
        Self {
            has_values: true,
            protocols: [Some(Protocol::Https), Some(Protocol::Http)],
        }
    }

    /// Parse a comma separated protocol list.
    ///
    /// Unknown tokens are dropped. An empty list, or one without any known
    /// token, leaves the restriction absent.
    pub fn parse(protocols: &str) -> Self {
        let tokens: Vec<String> = protocols
            .split(',')
            .map(|v| v.trim().to_lowercase())
            .collect();

        if tokens.len() == 1 && tokens[0] == Protocol::Http.as_str() {
            return Self::https_and_http();
        }

        let mut spr = Self::default();
        for token in &tokens {
            let protocol = match token.as_str() {
                "https" => Protocol::Https,
                "http" => Protocol::Http,
                _ => continue,
            };
            spr.protocols[protocol.index()] = Some(protocol);
            spr.has_values = true;
        }

        // `http,http` and friends would end up as HTTP only.
        if spr.protocols == [None, Some(Protocol::Http)] {
            return Self::https_and_http();
        }

        spr
    }

    /// Whether a restriction is present.
    pub fn has_values(&self) -> bool {
        self.has_values
    }

    /// Check whether `protocol` is permitted.
    pub fn allows(&self, protocol: Protocol) -> bool {
        self.protocols[protocol.index()].is_some()
    }
}

impl fmt::Display for SignedProtocols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<&str> = self
            .protocols
            .iter()
            .flatten()
            .map(Protocol::as_str)
            .collect();
        f.write_str(&rendered.join(","))
    }
}
