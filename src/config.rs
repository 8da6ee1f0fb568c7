use crate::arecord::ARecordResource;
use crate::common::Result;
use crate::constellix::ConstellixClient;

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub constellix: crate::constellix::Config,
}

impl Config {
    /// Read `CONSTELLIX__API_KEY`, `CONSTELLIX__SECRET_KEY` and optionally
    /// `CONSTELLIX__BASE_URL` from the environment.
    #[cfg(feature = "cli")]
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let constellix = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CONSTELLIX")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(Self { constellix })
    }

    pub fn into_client(self) -> Result<ConstellixClient> {
        ConstellixClient::try_from(self.constellix)
    }

    pub fn get_resource(self) -> Result<ARecordResource<ConstellixClient>> {
        Ok(ARecordResource::new(self.into_client()?))
    }
}
