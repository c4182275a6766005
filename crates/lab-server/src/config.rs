use std::{
    env,
    net::{AddrParseError, SocketAddr},
    path::PathBuf,
};

use thiserror::Error;

const ENV_ADDR_KEY: &str = "LAB_SERVER_ADDR";
const ENV_LOG_FILTER_KEY: &str = "LAB_LOG_FILTER";
const ENV_EXPORT_DIR_KEY: &str = "LAB_EXPORT_DIR";

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    8080,
);
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_EXPORT_DIR: &str = "artifacts";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_filter: String,
    pub export_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LAB_SERVER_ADDR is not a valid socket address: {0}")]
    InvalidListenAddr(#[source] AddrParseError),
    #[error("LAB_LOG_FILTER must not be empty or whitespace")]
    InvalidLogFilter,
    #[error("LAB_EXPORT_DIR must not be empty or whitespace")]
    InvalidExportDir,
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match read_env(ENV_ADDR_KEY)? {
            Some(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            None => DEFAULT_LISTEN_ADDR,
        };

        let log_filter = match read_env(ENV_LOG_FILTER_KEY)? {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::InvalidLogFilter),
            Some(value) => value,
            None => DEFAULT_LOG_FILTER.to_owned(),
        };

        let export_dir = match read_env(ENV_EXPORT_DIR_KEY)? {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::InvalidExportDir),
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_EXPORT_DIR),
        };

        Ok(Self {
            listen_addr,
            log_filter,
            export_dir,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, sync::Mutex};

    use super::{Config, ConfigError, ENV_ADDR_KEY, ENV_EXPORT_DIR_KEY, ENV_LOG_FILTER_KEY};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> [EnvVarGuard; 3] {
        [
            EnvVarGuard::unset(ENV_ADDR_KEY),
            EnvVarGuard::unset(ENV_LOG_FILTER_KEY),
            EnvVarGuard::unset(ENV_EXPORT_DIR_KEY),
        ]
    }

    #[test]
    fn defaults_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.export_dir, PathBuf::from("artifacts"));
    }

    #[test]
    fn uses_overrides_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _addr = EnvVarGuard::set(ENV_ADDR_KEY, "127.0.0.1:9090");
        let _filter = EnvVarGuard::set(ENV_LOG_FILTER_KEY, "debug,runtime=trace");
        let _export = EnvVarGuard::set(ENV_EXPORT_DIR_KEY, "out/runs");

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.log_filter, "debug,runtime=trace");
        assert_eq!(config.export_dir, PathBuf::from("out/runs"));
    }

    #[test]
    fn returns_error_for_invalid_listen_address_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR_KEY, "not-an-addr");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidListenAddr(_)));
    }

    #[test]
    fn returns_error_for_whitespace_log_filter() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_LOG_FILTER_KEY, "  ");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidLogFilter));
    }

    #[test]
    fn returns_error_for_empty_export_dir() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_EXPORT_DIR_KEY, "");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidExportDir));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_naming_non_unicode_variable() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            ENV_EXPORT_DIR_KEY,
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::NonUnicode("LAB_EXPORT_DIR")));
        assert_eq!(err.to_string(), "LAB_EXPORT_DIR contains non-unicode data");
    }
}
