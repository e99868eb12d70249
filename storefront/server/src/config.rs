use medica_client::{Config as ClientConfig, Result, config::try_load};

pub struct Config {
    pub port: u16,
    pub client: ClientConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("MEDICA_PORT", "3000")?,
            client: ClientConfig::load()?,
        })
    }
}
