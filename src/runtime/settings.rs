use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(e) = s.validate() {
                log::warn!("invalid config, using defaults: {e}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent startup.
            log::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
