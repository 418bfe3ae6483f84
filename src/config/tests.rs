use super::load::{
    ValidationError, default_cache_path, default_config_path, resolve_cache_path,
    resolve_config_path,
};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_cadenza_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", "/tmp/cadenza-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/cadenza-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("cadenza")
            .join("config.toml")
    );
}

#[test]
fn cache_path_resolution_order() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("CADENZA_CACHE_PATH");
    let _g2 = EnvGuard::set("XDG_CACHE_HOME", "/tmp/xdg-cache-home");

    assert_eq!(
        default_cache_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-cache-home")
            .join("cadenza")
            .join("state.json")
    );

    let _g3 = EnvGuard::set("CADENZA_CACHE_PATH", "/tmp/explicit-state.json");
    assert_eq!(
        resolve_cache_path().unwrap(),
        std::path::PathBuf::from("/tmp/explicit-state.json")
    );

    let mut settings = Settings::default();
    settings.cache.path = Some("/tmp/from-config.json".into());
    assert_eq!(
        settings.cache_path().unwrap(),
        std::path::PathBuf::from("/tmp/from-config.json")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[search]
debounce_ms = 150
threshold = 0.4
limit = 25

[cache]
enabled = false
recent_paths = 3

[library]
root = "/srv/music"
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
display_fields = ["filename"]
display_separator = "::"
artist_separators = ["&"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CADENZA__SEARCH__DEBOUNCE_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.search.debounce_ms, 150);
    assert_eq!(s.debounce(), std::time::Duration::from_millis(150));
    assert!((s.search.threshold - 0.4).abs() < f64::EPSILON);
    assert_eq!(s.search.limit, Some(25));
    assert!(!s.cache.enabled);
    assert_eq!(s.cache.recent_paths, 3);
    assert_eq!(s.library.root, Some(std::path::PathBuf::from("/srv/music")));
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_separator, "::");
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Filename));
    assert_eq!(s.library.artist_separators, vec!["&".to_string()]);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[search]
debounce_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CADENZA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CADENZA__SEARCH__DEBOUNCE_MS", "50");

    let s = Settings::load().unwrap();
    assert_eq!(s.search.debounce_ms, 50);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert_eq!(s.validate(), Ok(()));

    s.search.threshold = 1.5;
    assert_eq!(s.validate(), Err(ValidationError::Threshold(1.5)));

    s.search.threshold = 0.6;
    s.cache.recent_paths = 0;
    assert_eq!(s.validate(), Err(ValidationError::RecentPaths));
}

#[test]
fn default_settings_render_as_loadable_toml() {
    let rendered = Settings::default().to_toml().unwrap();
    assert!(rendered.contains("[search]"));
    assert!(rendered.contains("debounce_ms = 300"));

    let parsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.search.debounce_ms, 300);
    assert_eq!(parsed.cache.recent_paths, 10);
    assert_eq!(parsed.library.extensions.len(), 4);
}
