use anyhow::{bail, Context};

/// Which family of repositories the application is wired against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Remote,
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mock" => Ok(Backend::Memory),
            "remote" => Ok(Backend::Remote),
            other => bail!("unknown backend {other:?}, expected \"memory\" or \"remote\""),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub avatar_url_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    /// Present only when `backend` is `Remote`.
    pub remote: Option<RemoteConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));

        let backend = match lookup("MEALPLANNER_BACKEND") {
            Some(v) => v.parse::<Backend>()?,
            None => Backend::Memory,
        };

        let remote = match backend {
            Backend::Memory => None,
            Backend::Remote => Some(RemoteConfig {
                database_url: required("DATABASE_URL")?,
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(10),
                storage: StorageConfig {
                    endpoint: required("MINIO_ENDPOINT")?,
                    bucket: required("MINIO_BUCKET")?,
                    access_key: required("MINIO_ACCESS_KEY")?,
                    secret_key: required("MINIO_SECRET_KEY")?,
                    region: lookup("MINIO_REGION").unwrap_or_else(|| "us-east-1".into()),
                    avatar_url_ttl_secs: lookup("AVATAR_URL_TTL_SECS")
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(60 * 60),
                },
                jwt: JwtConfig {
                    secret: required("JWT_SECRET")?,
                    issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "mealplanner".into()),
                    audience: lookup("JWT_AUDIENCE")
                        .unwrap_or_else(|| "mealplanner-users".into()),
                },
            }),
        };

        Ok(Self { backend, remote })
    }

    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            remote: None,
        }
    }
}
