use std::env;

use serde::Deserialize;
use tracing::warn;

const DEFAULT_DB_HOST: &str = "cluster0.jmx7rsi.mongodb.net";
const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseMode {
    MongoDb,
    Memory,
}

/// The parts of a Firebase service-account file this backend reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
}

impl ServiceAccount {
    /// Parses the JSON blob from the environment. The key material usually
    /// arrives with escaped newlines, which are restored here.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut account: ServiceAccount = serde_json::from_str(raw)?;
        account.private_key = account.private_key.replace("\\n", "\n");
        Ok(account)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_mode: DatabaseMode,
    pub mongodb_uri: String,
    pub database_name: String,
    pub firebase: ServiceAccount,
    pub firebase_jwks_url: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub payment_currency: String,
    pub doctors_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| {
                warn!("PORT not set or invalid, using 5000");
                5000
            });

        let database_mode = match env::var("DATABASE_MODE").as_deref() {
            Ok("memory") => DatabaseMode::Memory,
            _ => DatabaseMode::MongoDb,
        };

        let mongodb_uri = env::var("MONGODB_URI").unwrap_or_else(|_| {
            let user = env::var("DB_USER").unwrap_or_else(|_| {
                warn!("DB_USER not set, using empty value");
                String::new()
            });
            let pass = env::var("DB_PASS").unwrap_or_else(|_| {
                warn!("DB_PASS not set, using empty value");
                String::new()
            });
            let host = env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string());

            if user.is_empty() || pass.is_empty() {
                String::new()
            } else {
                format!("mongodb+srv://{}:{}@{}/", user, pass, host)
            }
        });

        let firebase = match env::var("FIREBASE_SERVICE_ACCOUNT") {
            Ok(raw) => ServiceAccount::from_json(&raw).unwrap_or_else(|e| {
                warn!("FIREBASE_SERVICE_ACCOUNT is not valid JSON: {}", e);
                ServiceAccount::default()
            }),
            Err(_) => {
                warn!("FIREBASE_SERVICE_ACCOUNT not set, bearer tokens will not verify");
                ServiceAccount::default()
            }
        };

        let config = Self {
            port,
            database_mode,
            mongodb_uri,
            database_name: env::var("DB_NAME").unwrap_or_else(|_| "doctors_portal".to_string()),
            firebase,
            firebase_jwks_url: env::var("FIREBASE_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_JWKS_URL.to_string()),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_else(|_| {
                warn!("STRIPE_SECRET_KEY not set, payment routes disabled");
                String::new()
            }),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            payment_currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            doctors_enabled: env::var("DOCTORS_ENABLED")
                .map(|value| !matches!(value.as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.is_database_configured() && self.is_identity_configured()
    }

    pub fn is_database_configured(&self) -> bool {
        self.database_mode == DatabaseMode::Memory || !self.mongodb_uri.is_empty()
    }

    pub fn is_identity_configured(&self) -> bool {
        !self.firebase.project_id.is_empty()
    }

    pub fn is_payments_configured(&self) -> bool {
        !self.stripe_secret_key.is_empty() && !self.stripe_api_base.is_empty()
    }
}
