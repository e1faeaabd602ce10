use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser};
use nutriscale_core::{
    domain::common::{LLMConfig, MessagingConfig, NutriscaleConfig, RealtimeConfig},
    infrastructure::{
        llm::gemini_client::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL},
        messaging::telegram::DEFAULT_TELEGRAM_API_BASE_URL,
    },
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriscale-api", version, about = "Nutrition scale dashboard API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub firebase: FirebaseArgs,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/nutriscale`
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "METRICS_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub metrics_enabled: bool,

    #[arg(long, env = "TLS_CERT_PATH", requires = "tls_key_path")]
    pub tls_cert_path: Option<PathBuf>,

    #[arg(long, env = "TLS_KEY_PATH", requires = "tls_cert_path")]
    pub tls_key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "google-api-key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_API_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_api_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct FirebaseArgs {
    #[arg(long, env = "FIREBASE_DATABASE_URL")]
    pub firebase_database_url: String,

    /// Database secret or ID token
    #[arg(long, env = "FIREBASE_AUTH", hide_env_values = true)]
    pub firebase_auth: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct TelegramArgs {
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "TELEGRAM_API_BASE_URL", default_value = DEFAULT_TELEGRAM_API_BASE_URL)]
    pub telegram_api_base_url: String,

    #[arg(long, env = "RELAY_CAPTION_LABEL", default_value = "Gemini")]
    pub relay_caption_label: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// `tracing` filter directives, e.g. `info,nutriscale_core=debug`
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false, action = ArgAction::Set)]
    pub json: bool,
}

impl From<Args> for NutriscaleConfig {
    fn from(args: Args) -> Self {
        NutriscaleConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_api_base_url,
            },
            realtime: RealtimeConfig {
                database_url: args.firebase.firebase_database_url,
                auth_token: args.firebase.firebase_auth,
            },
            messaging: MessagingConfig {
                bot_token: args.telegram.telegram_bot_token,
                chat_id: args.telegram.telegram_chat_id,
                api_base_url: args.telegram.telegram_api_base_url,
                caption_label: args.telegram.relay_caption_label,
            },
        }
    }
}
