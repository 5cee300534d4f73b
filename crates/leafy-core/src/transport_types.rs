use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Transport backend types
///
/// Selects where the transfer orchestrator sends payloads. Defined in core
/// because configuration parses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportBackend {
    /// Multipart POST to the storefront's upload endpoint
    Http,
    /// Write objects under a local directory (development, tests)
    Local,
}

impl FromStr for TransportBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "https" => Ok(TransportBackend::Http),
            "local" => Ok(TransportBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid transport backend: {}", s)),
        }
    }
}

impl Display for TransportBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TransportBackend::Http => write!(f, "http"),
            TransportBackend::Local => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend() {
        assert_eq!("HTTP".parse::<TransportBackend>().unwrap(), TransportBackend::Http);
        assert_eq!("local".parse::<TransportBackend>().unwrap(), TransportBackend::Local);
        assert!("s3".parse::<TransportBackend>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for backend in [TransportBackend::Http, TransportBackend::Local] {
            assert_eq!(backend.to_string().parse::<TransportBackend>().unwrap(), backend);
        }
    }
}
