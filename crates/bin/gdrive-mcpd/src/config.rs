use clap::{Parser, builder::BoolishValueParser};
use gdrive_core::client::http::{
    DEFAULT_DRIVE_API_BASE,
    DEFAULT_SHEETS_API_BASE,
    parse_api_base,
};
use gdrive_core::store::CREDENTIALS_FILE_NAME;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "gdrive-mcpd", version, about = "Google Drive and Sheets MCP daemon.")]
struct CliArgs {
    /// Directory holding the credentials file.
    #[arg(long, env = "GDRIVE_CREDS_DIR")]
    creds_dir: Option<PathBuf>,

    #[arg(
        long = "stdio",
        env = "GDRIVE_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    /// Also serve streamable HTTP on this address.
    #[arg(long, env = "GDRIVE_MCP_HTTP_ADDR")]
    mcp_http_addr: Option<SocketAddr>,

    #[arg(long, env = "GDRIVE_DRIVE_API_BASE", default_value = DEFAULT_DRIVE_API_BASE)]
    drive_api_base: String,

    #[arg(long, env = "GDRIVE_SHEETS_API_BASE", default_value = DEFAULT_SHEETS_API_BASE)]
    sheets_api_base: String,

    #[arg(
        long,
        env = "GDRIVE_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,
}

/// Which MCP transports the daemon serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http(SocketAddr),
    StdioAndHttp(SocketAddr),
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct GdriveConfig {
    pub credentials_path: PathBuf,
    pub transport: Transport,
    pub drive_api_base: String,
    pub sheets_api_base: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("cannot resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

impl GdriveConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for GdriveConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let working_dir = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        let credentials_path = resolve_credentials_path(&working_dir, args.creds_dir);

        let transport = match (args.enable_stdio, args.mcp_http_addr) {
            (true, None) => Transport::Stdio,
            (true, Some(addr)) => Transport::StdioAndHttp(addr),
            (false, Some(addr)) => Transport::Http(addr),
            (false, None) => return Err(ConfigError::MissingSetting("GDRIVE_MCP_HTTP_ADDR")),
        };

        let drive_api_base = validate_base("GDRIVE_DRIVE_API_BASE", args.drive_api_base)?;
        let sheets_api_base = validate_base("GDRIVE_SHEETS_API_BASE", args.sheets_api_base)?;

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "GDRIVE_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        Ok(Self {
            credentials_path,
            transport,
            drive_api_base,
            sheets_api_base,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        })
    }
}

/// Absolute path of the credentials file. A missing, blank or relative
/// directory is taken against `working_dir`.
fn resolve_credentials_path(working_dir: &Path, creds_dir: Option<PathBuf>) -> PathBuf {
    let dir = match creds_dir.filter(|dir| !dir.as_os_str().to_string_lossy().trim().is_empty()) {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => working_dir.join(dir),
        None => working_dir.to_path_buf(),
    };
    dir.join(CREDENTIALS_FILE_NAME)
}

fn validate_base(name: &'static str, value: String) -> Result<String, ConfigError> {
    if parse_api_base(&value).is_ok() {
        Ok(value.trim().to_string())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            creds_dir: None,
            enable_stdio: true,
            mcp_http_addr: None,
            drive_api_base: DEFAULT_DRIVE_API_BASE.to_string(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[test]
    fn defaults_to_stdio_and_working_directory_credentials() {
        let config = GdriveConfig::try_from(base_args()).expect("config should parse");
        let working_dir = std::env::current_dir().expect("working directory");

        assert_eq!(config.transport, Transport::Stdio);
        assert!(config.credentials_path.is_absolute());
        assert_eq!(
            config.credentials_path,
            working_dir.join(".gdrive-server-credentials.json")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn relative_creds_dir_is_made_absolute() {
        let working_dir = Path::new("/srv/agent");

        assert_eq!(
            resolve_credentials_path(working_dir, Some(PathBuf::from("secrets"))),
            PathBuf::from("/srv/agent/secrets/.gdrive-server-credentials.json")
        );
        assert_eq!(
            resolve_credentials_path(working_dir, None),
            PathBuf::from("/srv/agent/.gdrive-server-credentials.json")
        );
    }

    #[test]
    fn creds_dir_override_is_used() {
        let mut args = base_args();
        args.creds_dir = Some(PathBuf::from("/var/lib/gdrive"));

        let config = GdriveConfig::try_from(args).expect("config should parse");

        assert_eq!(
            config.credentials_path,
            PathBuf::from("/var/lib/gdrive/.gdrive-server-credentials.json")
        );
    }

    #[test]
    fn blank_creds_dir_falls_back_to_default() {
        let mut args = base_args();
        args.creds_dir = Some(PathBuf::from("  "));

        let config = GdriveConfig::try_from(args).expect("config should parse");
        let working_dir = std::env::current_dir().expect("working directory");

        assert_eq!(
            config.credentials_path,
            working_dir.join(".gdrive-server-credentials.json")
        );
    }

    #[test]
    fn http_only_requires_an_address() {
        let mut args = base_args();
        args.enable_stdio = false;
        assert!(matches!(
            GdriveConfig::try_from(args),
            Err(ConfigError::MissingSetting("GDRIVE_MCP_HTTP_ADDR"))
        ));

        let mut args = base_args();
        let addr: SocketAddr = "127.0.0.1:4030".parse().expect("valid addr");
        args.mcp_http_addr = Some(addr);
        let config = GdriveConfig::try_from(args).expect("config should parse");
        assert_eq!(config.transport, Transport::StdioAndHttp(addr));
    }

    #[test]
    fn rejects_non_http_api_base() {
        let mut args = base_args();
        args.sheets_api_base = "ftp://example.com".to_string();

        assert!(matches!(
            GdriveConfig::try_from(args),
            Err(ConfigError::InvalidSetting {
                name: "GDRIVE_SHEETS_API_BASE",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unparseable_api_base() {
        let mut args = base_args();
        args.drive_api_base = "https://".to_string();

        assert!(matches!(
            GdriveConfig::try_from(args),
            Err(ConfigError::InvalidSetting {
                name: "GDRIVE_DRIVE_API_BASE",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut args = base_args();
        args.request_timeout_secs = 0;

        assert!(GdriveConfig::try_from(args).is_err());
    }
}
