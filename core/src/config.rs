//! Timing constants and fixed strings used by the interaction layer.
//!
//! Every field has a default, so a host page can pass a partial JSON object
//! such as `{"search_debounce_ms": 150}` and keep the rest.

pub const THEME_LOCAL_STORAGE_KEY: &'static str = "theme";
pub const PLACEHOLDER_USERNAME: &'static str = "your_username";

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    ZeroStoryStep,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub theme_storage_key: String,
    pub comment_username: String,
    pub theme_transition_ms: u32,
    pub floating_heart_ms: u32,
    pub big_heart_ms: u32,
    pub upload_delay_ms: u32,
    pub story_tick_ms: u32,
    pub story_step: u8,
    pub search_debounce_ms: u32,
    pub toast_display_ms: u32,
    pub toast_exit_ms: u32,
    /// Distance from the bottom of the page, in pixels, that triggers a load.
    pub scroll_threshold_px: f64,
    pub scroll_load_delay_ms: u32,
    /// `log` level filter name for the browser console logger.
    pub log_level: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            theme_storage_key: THEME_LOCAL_STORAGE_KEY.to_owned(),
            comment_username: PLACEHOLDER_USERNAME.to_owned(),
            theme_transition_ms: 300,
            floating_heart_ms: 1000,
            big_heart_ms: 800,
            upload_delay_ms: 2000,
            story_tick_ms: 50,
            story_step: 2,
            search_debounce_ms: 300,
            toast_display_ms: 3000,
            toast_exit_ms: 300,
            scroll_threshold_px: 1000.0,
            scroll_load_delay_ms: 1500,
            log_level: "info".to_owned(),
        }
    }
}

impl FeedConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;

        // a zero step would keep the story viewer open forever
        if config.story_step == 0 {
            return Err(ConfigError::ZeroStoryStep);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FeedConfig::from_json(r#"{"search_debounce_ms": 150}"#).unwrap();

        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.story_step, 2);
        assert_eq!(config.theme_storage_key, "theme");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FeedConfig::from_json("{}").unwrap(), FeedConfig::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            FeedConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            FeedConfig::from_json(r#"{"story_step": 0}"#),
            Err(ConfigError::ZeroStoryStep)
        ));
    }
}
