use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const MODEL_NAME: &str = "gemini-2.5-flash";
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/";

/// Instructions wrapped around the rendered conversation for chat drafting.
pub const DRAFTING_INSTRUCTIONS: &str = "You are an AI email assistant that helps draft and refine professional emails.
Always use the following format:
Subject: <subject line>
<email body>

Fill in missing details by asking the user politely.
If the user requests to send or share an email, identify the recipient email and prepare for confirmation.
Use simple, polite English and business tone.";

/// Instructions for the one-shot form flow.
pub const COMPOSE_INSTRUCTIONS: &str = "Format:
Subject: [subject line]

[Email body with proper greeting, content, and closing]";

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_BIND_HOST: &str = "127.0.0.1";
const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Well-known submission endpoints. `Custom` needs `SMTP_SERVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpProvider {
    Gmail,
    Outlook,
    Yahoo,
    Custom,
}

impl SmtpProvider {
    pub fn preset(&self) -> Option<(&'static str, u16)> {
        match self {
            SmtpProvider::Gmail => Some(("smtp.gmail.com", 587)),
            SmtpProvider::Outlook => Some(("smtp-mail.outlook.com", 587)),
            SmtpProvider::Yahoo => Some(("smtp.mail.yahoo.com", 587)),
            SmtpProvider::Custom => None,
        }
    }
}

impl FromStr for SmtpProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gmail" => Ok(SmtpProvider::Gmail),
            "outlook" => Ok(SmtpProvider::Outlook),
            "yahoo" => Ok(SmtpProvider::Yahoo),
            "custom" => Ok(SmtpProvider::Custom),
            _ => Err(ConfigError::Invalid {
                name: "SMTP_PROVIDER",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub timeout: Duration,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted JSON request body, base64 attachments included.
    pub max_upload_bytes: usize,
    pub session_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub smtp: SmtpConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", &raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let gemini = GeminiConfig {
            api_key: require("GEMINI_API_KEY")?,
            model: get("GEMINI_MODEL").unwrap_or_else(|| MODEL_NAME.to_string()),
            base_url: get("GEMINI_API_URL").unwrap_or_else(|| GEMINI_API_URL.to_string()),
            timeout,
        };

        let provider = match get("SMTP_PROVIDER") {
            Some(raw) => raw.parse::<SmtpProvider>()?,
            None => SmtpProvider::Gmail,
        };
        let preset = provider.preset();
        let server = match (get("SMTP_SERVER"), preset) {
            (Some(server), _) => server,
            (None, Some((server, _))) => server.to_string(),
            (None, None) => return Err(ConfigError::Missing("SMTP_SERVER")),
        };
        let port = match get("SMTP_PORT") {
            Some(raw) => parse_number("SMTP_PORT", &raw)?,
            None => preset.map(|(_, port)| port).unwrap_or(DEFAULT_SMTP_PORT),
        };
        let sender = require("SENDER_EMAIL")?;
        let smtp = SmtpConfig {
            server,
            port,
            username: get("SMTP_USERNAME").unwrap_or_else(|| sender.clone()),
            password: require("SENDER_PASSWORD")?,
            sender,
            timeout,
        };

        let server = ServerConfig {
            host: get("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            port: match get("BIND_PORT") {
                Some(raw) => parse_number("BIND_PORT", &raw)?,
                None => DEFAULT_BIND_PORT,
            },
            max_upload_bytes: match get("MAX_UPLOAD_BYTES") {
                Some(raw) => parse_number("MAX_UPLOAD_BYTES", &raw)?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            session_ttl: match get("SESSION_TTL_SECS") {
                Some(raw) => Duration::from_secs(parse_number("SESSION_TTL_SECS", &raw)?),
                None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            },
        };

        Ok(AppConfig { gemini, smtp, server })
    }
}

fn parse_number<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
    })
}
