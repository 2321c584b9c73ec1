use std::env;
use std::net::SocketAddr;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Which persistence collaborator the composition root wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Supabase,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Offset of the clinic's wall clock from UTC. `None` means the host's local zone.
    pub clinic_utc_offset_seconds: Option<i32>,
    pub seed_path: Option<String>,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            clinic_utc_offset_seconds: None,
            seed_path: None,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = env::var("CLINIC_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().unwrap_or_else(|_| {
            warn!("CLINIC_BIND_ADDR '{}' is not a socket address, using {}", bind_addr, DEFAULT_BIND_ADDR);
            SocketAddr::from(([0, 0, 0, 0], 3000))
        });

        let clinic_utc_offset_seconds = match env::var("CLINIC_UTC_OFFSET_SECONDS") {
            Ok(raw) => match raw.trim().parse::<i32>() {
                Ok(offset) => Some(offset),
                Err(_) => {
                    warn!("CLINIC_UTC_OFFSET_SECONDS '{}' is not an integer, using host local zone", raw);
                    None
                }
            },
            Err(_) => None,
        };

        let config = Self {
            bind_addr,
            clinic_utc_offset_seconds,
            seed_path: env::var("CLINIC_SEED_PATH").ok().filter(|p| !p.is_empty()),
            supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY").unwrap_or_default(),
        };

        if config.store_backend() == StoreBackend::InMemory && config.seed_path.is_none() {
            warn!("Neither Supabase nor CLINIC_SEED_PATH configured - starting with an empty clinic");
        }

        config
    }

    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }

    pub fn store_backend(&self) -> StoreBackend {
        if self.is_supabase_configured() {
            StoreBackend::Supabase
        } else {
            StoreBackend::InMemory
        }
    }
}
