use crate::config::Settings;
use crate::error::Result;

pub trait TokenProvider: Send + Sync {
    /// Current token, possibly empty. Read once per command run.
    fn token(&self) -> Result<String>;
}

pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

impl TokenProvider for Settings {
    fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
