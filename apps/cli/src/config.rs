use punchcard::geo::GeoPoint;
use punchcard::session::RoleSet;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub display_name: String,
    pub roles: RoleSet,
    /// Manually pinned position; stands in for a live device feed.
    pub position: Option<GeoPoint>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url =
            env::var("PUNCHCARD_API_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());

        let token = env::var("PUNCHCARD_TOKEN").ok();
        let display_name = env::var("PUNCHCARD_NAME").unwrap_or_else(|_| "staff".to_string());

        let roles = match env::var("PUNCHCARD_ROLES") {
            Ok(list) => RoleSet::from_claims(list.split(',').map(str::trim)),
            Err(_) => RoleSet::empty(),
        };

        let position = match (env::var("PUNCHCARD_LAT"), env::var("PUNCHCARD_LNG")) {
            (Ok(lat), Ok(lng)) => {
                let lat: f64 = lat
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PUNCHCARD_LAT".to_string()))?;
                let lng: f64 = lng
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PUNCHCARD_LNG".to_string()))?;
                Some(GeoPoint::new(lat, lng))
            }
            (Err(_), Err(_)) => None,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "PUNCHCARD_LAT and PUNCHCARD_LNG must be set together".to_string(),
                ));
            }
        };

        Ok(Config {
            api_url,
            token,
            display_name,
            roles,
            position,
        })
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .ok_or(ConfigError::MissingVar("PUNCHCARD_TOKEN"))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
        }
    }
}

impl std::error::Error for ConfigError {}
