use serde::Deserialize;

/// Site configuration, read from the `folio.toml` bundled into the build.
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Relative path of the data document.
    pub data_path: String,
    /// `log` level name for the browser console logger.
    pub log_level: String,
    pub hooks: Hooks,
    pub scroll: ScrollConfig,
    pub form: FormConfig,
    pub loading: LoadingConfig,
}

/// Element ids the page markup is expected to provide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hooks {
    pub about: String,
    pub projects: String,
    pub spotlight: String,
    pub prev: String,
    pub next: String,
    pub form: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub counter: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Pixels per auto-scroll tick.
    pub step_px: f64,
    pub tick_ms: u32,
    /// Pixels per click nudge.
    pub nudge_px: f64,
    /// Minimum viewport width for vertical scrolling.
    pub vertical_breakpoint_px: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub message_limit: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    pub text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            data_path: "assets/data/data.json".to_string(),
            log_level: "info".to_string(),
            hooks: Hooks::default(),
            scroll: ScrollConfig::default(),
            form: FormConfig::default(),
            loading: LoadingConfig::default(),
        }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Hooks {
            about: "aboutMe".to_string(),
            projects: "projectsList".to_string(),
            spotlight: "spotlight".to_string(),
            prev: "arrowPrev".to_string(),
            next: "arrowNext".to_string(),
            form: "contactForm".to_string(),
            name: "name".to_string(),
            email: "email".to_string(),
            message: "message".to_string(),
            counter: "msg-remaining".to_string(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            step_px: 20.0,
            tick_ms: 16,
            nudge_px: 200.0,
            vertical_breakpoint_px: 900.0,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            message_limit: 300,
            success_message: "Submitted successfully. Validation passed!".to_string(),
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        LoadingConfig {
            text: "Loading…".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        let cfg: SiteConfig = toml::from_str(raw).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like `from_toml_str`, but logs and falls back to defaults on error.
    pub fn from_toml_or_default(raw: &str) -> Self {
        match Self::from_toml_str(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("[config] Invalid site config, using defaults: {}", e);
                SiteConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data_path.trim().is_empty() {
            return Err("data_path must not be empty".to_string());
        }
        if self.scroll.tick_ms == 0 {
            return Err("scroll.tick_ms must be greater than zero".to_string());
        }
        if self.scroll.step_px.is_nan() || self.scroll.step_px <= 0.0 {
            return Err("scroll.step_px must be greater than zero".to_string());
        }
        if self.form.message_limit == 0 {
            return Err("form.message_limit must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Parsed `log_level`, defaulting to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_markup() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.data_path, "assets/data/data.json");
        assert_eq!(cfg.hooks.about, "aboutMe");
        assert_eq!(cfg.hooks.projects, "projectsList");
        assert_eq!(cfg.hooks.counter, "msg-remaining");
        assert_eq!(cfg.scroll.tick_ms, 16);
        assert_eq!(cfg.scroll.step_px, 20.0);
        assert_eq!(cfg.form.message_limit, 300);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SiteConfig::from_toml_str("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = SiteConfig::from_toml_str(
            r#"
            data_path = "data/site.json"
            [scroll]
            nudge_px = 320
            [hooks]
            about = "profile"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.data_path, "data/site.json");
        assert_eq!(cfg.scroll.nudge_px, 320.0);
        assert_eq!(cfg.scroll.step_px, 20.0);
        assert_eq!(cfg.hooks.about, "profile");
        assert_eq!(cfg.hooks.spotlight, "spotlight");
    }

    #[test]
    fn rejects_zero_tick_and_limit() {
        assert!(SiteConfig::from_toml_str("[scroll]\ntick_ms = 0").is_err());
        assert!(SiteConfig::from_toml_str("[form]\nmessage_limit = 0").is_err());
        assert!(SiteConfig::from_toml_str("data_path = \" \"").is_err());
    }

    #[test]
    fn bad_toml_falls_back_to_defaults() {
        let cfg = SiteConfig::from_toml_or_default("data_path = [");
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn log_level_parses_names() {
        let mut cfg = SiteConfig::default();
        assert_eq!(cfg.log_level(), log::Level::Info);
        cfg.log_level = "debug".to_string();
        assert_eq!(cfg.log_level(), log::Level::Debug);
        cfg.log_level = "loud".to_string();
        assert_eq!(cfg.log_level(), log::Level::Info);
    }
}
