//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `WORDWEAVE_*` environment variables over an
//! optional configuration file. Session key material is resolved separately
//! so its failure modes can be reported precisely at startup.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_IMAGE_DIR: &str = "./images";
const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Minimum accepted session key length in bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Runtime configuration for the Wordweave server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORDWEAVE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it accounts live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// Directory receiving uploaded profile pictures.
    pub image_dir: Option<PathBuf>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated key when no key file is usable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy for the session cookie.
    pub cookie_same_site: Option<String>,
}

/// Failures while turning [`AppSettings`] into server parameters.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        /// Configured text.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `cookie_same_site` names no known policy.
    #[error("invalid cookie_same_site '{value}'; expected {SAME_SITE_EXPECTED}")]
    SameSite {
        /// Configured text.
        value: String,
    },
    /// Browsers drop `SameSite=None` cookies that are not `Secure`.
    #[error("cookie_same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
}

impl AppSettings {
    /// Listening address, falling back to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Pool size cap, ten unless configured.
    #[must_use]
    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Upload directory, `./images` unless configured.
    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.image_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR))
    }

    /// Whether the session cookie carries `Secure`; on unless disabled.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Parsed `SameSite` policy; `Lax` unless configured.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        let Some(value) = self.cookie_same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        let same_site = match value.to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" => SameSite::None,
            _ => {
                return Err(SettingsError::SameSite {
                    value: value.to_owned(),
                });
            }
        };
        if same_site == SameSite::None && !self.cookie_secure() {
            return Err(SettingsError::InsecureSameSiteNone);
        }
        Ok(same_site)
    }
}

/// Load settings from the process arguments, environment and config file.
pub fn load_settings() -> ortho_config::OrthoResult<AppSettings> {
    AppSettings::load_from_iter(std::env::args_os())
}

/// Load settings as if the binary had been started without arguments.
pub fn load_settings_without_args() -> ortho_config::OrthoResult<AppSettings> {
    AppSettings::load_from_iter([OsString::from("wordweave")])
}

/// Build mode governing whether a throwaway session key is acceptable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Built with debug assertions.
    Debug,
    /// Optimised deployment build.
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    #[must_use]
    pub const fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Reasons no session signing key could be produced.
#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Configured key path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The key file holds fewer than [`SESSION_KEY_MIN_LEN`] bytes.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Configured key path.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
    /// Release build with no key file and no ephemeral opt-in.
    #[error("no session key file configured; set WORDWEAVE_SESSION_KEY_FILE")]
    MissingKeyFile,
}

/// Resolve the cookie signing key for the current build.
pub fn resolve_session_key(settings: &AppSettings) -> Result<Key, SessionKeyError> {
    resolve_session_key_for(settings, BuildMode::from_debug_assertions())
}

/// Resolve the cookie signing key as `mode` would.
///
/// A configured key file must be readable and at least
/// [`SESSION_KEY_MIN_LEN`] bytes long. Without a usable file, debug builds
/// and deployments with `session_allow_ephemeral` fall back to a generated
/// key; sessions then do not survive a restart.
pub fn resolve_session_key_for(
    settings: &AppSettings,
    mode: BuildMode,
) -> Result<Key, SessionKeyError> {
    let ephemeral_ok = mode.is_debug() || settings.session_allow_ephemeral;

    let Some(path) = settings.session_key_file.as_deref() else {
        if ephemeral_ok {
            warn!("no session key file configured; using temporary key (dev only)");
            return Ok(Key::generate());
        }
        return Err(SessionKeyError::MissingKeyFile);
    };

    match std::fs::read(path) {
        Ok(bytes) => key_from_bytes(path, bytes),
        Err(error) if ephemeral_ok => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionKeyError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn key_from_bytes(path: &Path, mut bytes: Vec<u8>) -> Result<Key, SessionKeyError> {
    let length = bytes.len();
    if length < SESSION_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(SessionKeyError::KeyTooShort {
            path: path.to_path_buf(),
            length,
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}
