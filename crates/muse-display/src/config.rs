//! # Configuration
//!
//! [`MonitorConfig`] holds the tunable timing of the display pipeline.
//!
//! ## Loading Priority
//!
//! Configuration is loaded from the first source that provides a file:
//!
//! 1. Explicit path (programmatic or `--config`)
//! 2. `MUSE_DISPLAY_CONFIG` environment variable
//! 3. `./muse-display.toml` in the current directory
//!
//! Individual fields can always be overridden by environment variables,
//! even when loading from a file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DisplayError, DisplayResult};

/// Default render tick rate in Hz.
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Default delay before re-running a dropped connection, in milliseconds.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 20;

/// Timing configuration for the display pipeline.
///
/// # Examples
///
/// ```
/// use muse_display::config::MonitorConfig;
///
/// let config = MonitorConfig::default();
/// assert_eq!(config.tick_hz, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Render tick rate in Hz. Must be at least 1.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,

    /// Delay before the automatic reconnect attempt after a disconnect,
    /// in milliseconds.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

fn default_tick_hz() -> u32 {
    DEFAULT_TICK_HZ
}

fn default_reconnect_delay_ms() -> u64 {
    DEFAULT_RECONNECT_DELAY_MS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
        }
    }
}

impl MonitorConfig {
    /// Render tick period derived from [`tick_hz`](Self::tick_hz).
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_hz.max(1)))
    }

    /// Reconnect delay as a [`Duration`].
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Reject configurations the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// [`DisplayError::Config`] when `tick_hz` is zero.
    pub fn validate(&self) -> DisplayResult<()> {
        if self.tick_hz == 0 {
            return Err(DisplayError::Config {
                reason: "tick_hz must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Build a config from defaults plus environment variable overrides.
    ///
    /// Recognized: `MUSE_DISPLAY_TICK_HZ`, `MUSE_DISPLAY_RECONNECT_DELAY_MS`.
    pub fn from_env() -> DisplayResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file, with environment variable overrides.
    #[cfg(feature = "config-toml")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DisplayResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| DisplayError::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let mut config: Self = toml::from_str(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Discover and load config from the standard search path:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `MUSE_DISPLAY_CONFIG` environment variable
    /// 3. `./muse-display.toml`
    ///
    /// Falls back to environment-variable-only config if no file is found.
    #[cfg(feature = "config-toml")]
    pub fn discover(explicit_path: Option<&std::path::Path>) -> DisplayResult<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var("MUSE_DISPLAY_CONFIG") {
            let path = std::path::PathBuf::from(path);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        let local_path = std::path::PathBuf::from("muse-display.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        Self::from_env()
    }

    fn apply_env_overrides(&mut self) -> DisplayResult<()> {
        if let Ok(raw) = std::env::var("MUSE_DISPLAY_TICK_HZ") {
            self.tick_hz = raw.parse().map_err(|_| DisplayError::Config {
                reason: format!("MUSE_DISPLAY_TICK_HZ is not a valid tick rate: '{raw}'"),
            })?;
        }
        if let Ok(raw) = std::env::var("MUSE_DISPLAY_RECONNECT_DELAY_MS") {
            self.reconnect_delay_ms = raw.parse().map_err(|_| DisplayError::Config {
                reason: format!("MUSE_DISPLAY_RECONNECT_DELAY_MS is not a valid delay: '{raw}'"),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // Process-global env mutation, serialized behind ENV_LOCK by every test.
    fn set_env(key: &str, value: impl AsRef<std::ffi::OsStr>) {
        unsafe { std::env::set_var(key, value) };
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    struct EnvGuard {
        saved: Vec<(&'static str, Option<OsString>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let saved = keys.iter().map(|k| (*k, std::env::var_os(k))).collect();
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                if let Some(value) = value {
                    set_env(key, value);
                } else {
                    remove_env(key);
                }
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    const ENV_KEYS: &[&str] = &[
        "MUSE_DISPLAY_CONFIG",
        "MUSE_DISPLAY_TICK_HZ",
        "MUSE_DISPLAY_RECONNECT_DELAY_MS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            remove_env(key);
        }
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.tick_hz, DEFAULT_TICK_HZ);
        assert_eq!(config.reconnect_delay_ms, DEFAULT_RECONNECT_DELAY_MS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_period() {
        let config = MonitorConfig {
            tick_hz: 60,
            ..Default::default()
        };
        let period = config.tick_period();
        assert!(period > Duration::from_millis(16));
        assert!(period < Duration::from_millis(17));

        assert_eq!(
            MonitorConfig::default().reconnect_delay(),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = MonitorConfig {
            tick_hz: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DisplayError::Config { .. }));
        assert!(err.to_string().contains("tick_hz"));
    }

    #[test]
    fn test_from_env_overrides_and_bad_values() {
        let _lock = env_lock();
        let _env = EnvGuard::capture(ENV_KEYS);
        clear_env();

        let config = MonitorConfig::from_env().unwrap();
        assert_eq!(config, MonitorConfig::default());

        set_env("MUSE_DISPLAY_TICK_HZ", "30");
        set_env("MUSE_DISPLAY_RECONNECT_DELAY_MS", "250");
        let config = MonitorConfig::from_env().unwrap();
        assert_eq!(config.tick_hz, 30);
        assert_eq!(config.reconnect_delay_ms, 250);

        set_env("MUSE_DISPLAY_TICK_HZ", "sixty");
        let err = MonitorConfig::from_env().unwrap_err();
        assert!(matches!(err, DisplayError::Config { .. }));
        assert!(err.to_string().contains("MUSE_DISPLAY_TICK_HZ"));

        set_env("MUSE_DISPLAY_TICK_HZ", "0");
        let err = MonitorConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("tick_hz must be at least 1"));
    }

    #[cfg(feature = "config-toml")]
    mod file_tests {
        use super::*;
        use std::fs;
        use std::path::{Path, PathBuf};
        use std::time::{SystemTime, UNIX_EPOCH};

        fn unique_temp_dir(label: &str) -> PathBuf {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            let dir = std::env::temp_dir().join(format!(
                "muse-display-config-tests-{}-{}-{}",
                label,
                std::process::id(),
                now
            ));
            fs::create_dir_all(&dir).unwrap();
            dir
        }

        fn write_config(path: &Path, tick_hz: u32, delay_ms: u64) {
            fs::write(
                path,
                format!("tick_hz = {tick_hz}\nreconnect_delay_ms = {delay_ms}\n"),
            )
            .unwrap();
        }

        #[test]
        fn test_from_file_and_env_precedence() {
            let _lock = env_lock();
            let _env = EnvGuard::capture(ENV_KEYS);
            clear_env();

            let dir = unique_temp_dir("from-file");
            let config_path = dir.join("muse-display.toml");
            write_config(&config_path, 30, 100);

            let config = MonitorConfig::from_file(&config_path).unwrap();
            assert_eq!(config.tick_hz, 30);
            assert_eq!(config.reconnect_delay_ms, 100);

            // Env vars beat file values.
            set_env("MUSE_DISPLAY_TICK_HZ", "120");
            let config = MonitorConfig::from_file(&config_path).unwrap();
            assert_eq!(config.tick_hz, 120);
            assert_eq!(config.reconnect_delay_ms, 100);

            fs::remove_dir_all(dir).unwrap();
        }

        #[test]
        fn test_from_file_partial_uses_defaults() {
            let _lock = env_lock();
            let _env = EnvGuard::capture(ENV_KEYS);
            clear_env();

            let dir = unique_temp_dir("partial");
            let config_path = dir.join("muse-display.toml");
            fs::write(&config_path, "tick_hz = 24\n").unwrap();

            let config = MonitorConfig::from_file(&config_path).unwrap();
            assert_eq!(config.tick_hz, 24);
            assert_eq!(config.reconnect_delay_ms, DEFAULT_RECONNECT_DELAY_MS);

            fs::remove_dir_all(dir).unwrap();
        }

        #[test]
        fn test_from_file_missing_and_invalid_errors() {
            let _lock = env_lock();
            let _env = EnvGuard::capture(ENV_KEYS);
            clear_env();

            let dir = unique_temp_dir("errors");

            let missing = MonitorConfig::from_file(dir.join("missing.toml")).unwrap_err();
            assert!(matches!(missing, DisplayError::Config { .. }));
            assert!(missing.to_string().contains("Failed to read config file"));

            let invalid_path = dir.join("invalid.toml");
            fs::write(&invalid_path, "tick_hz = [").unwrap();
            let invalid = MonitorConfig::from_file(&invalid_path).unwrap_err();
            assert!(matches!(invalid, DisplayError::Config { .. }));

            let zero_path = dir.join("zero.toml");
            write_config(&zero_path, 0, 20);
            let zero = MonitorConfig::from_file(&zero_path).unwrap_err();
            assert!(zero.to_string().contains("tick_hz must be at least 1"));

            fs::remove_dir_all(dir).unwrap();
        }

        #[test]
        fn test_discover_search_priority() {
            let _lock = env_lock();
            let _env = EnvGuard::capture(ENV_KEYS);
            clear_env();

            let root = unique_temp_dir("discover");
            let explicit_path = root.join("explicit.toml");
            let env_path = root.join("env.toml");
            write_config(&explicit_path, 10, 10);
            write_config(&env_path, 20, 20);

            let explicit = MonitorConfig::discover(Some(&explicit_path)).unwrap();
            assert_eq!(explicit.tick_hz, 10);

            set_env("MUSE_DISPLAY_CONFIG", env_path.to_string_lossy().to_string());
            let via_env_pointer = MonitorConfig::discover(None).unwrap();
            assert_eq!(via_env_pointer.tick_hz, 20);

            // With no pointer and no local file, env-only defaults apply.
            remove_env("MUSE_DISPLAY_CONFIG");
            set_env("MUSE_DISPLAY_RECONNECT_DELAY_MS", "5");
            let fallback = MonitorConfig::discover(None).unwrap();
            assert_eq!(fallback.tick_hz, DEFAULT_TICK_HZ);
            assert_eq!(fallback.reconnect_delay_ms, 5);

            fs::remove_dir_all(root).unwrap();
        }
    }
}
