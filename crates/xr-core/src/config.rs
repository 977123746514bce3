use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    ImmersiveVr,
    ImmersiveAr,
    Inline,
}

impl SessionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::ImmersiveVr => "immersive-vr",
            SessionMode::ImmersiveAr => "immersive-ar",
            SessionMode::Inline => "inline",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "immersive-vr" => Ok(SessionMode::ImmersiveVr),
            "immersive-ar" => Ok(SessionMode::ImmersiveAr),
            "inline" => Ok(SessionMode::Inline),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceSpaceKind {
    Viewer,
    Local,
    LocalFloor,
    BoundedFloor,
}

impl ReferenceSpaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceSpaceKind::Viewer => "viewer",
            ReferenceSpaceKind::Local => "local",
            ReferenceSpaceKind::LocalFloor => "local-floor",
            ReferenceSpaceKind::BoundedFloor => "bounded-floor",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "viewer" => Ok(ReferenceSpaceKind::Viewer),
            "local" => Ok(ReferenceSpaceKind::Local),
            "local-floor" => Ok(ReferenceSpaceKind::LocalFloor),
            "bounded-floor" => Ok(ReferenceSpaceKind::BoundedFloor),
            other => Err(ConfigError::UnknownSpace(other.to_string())),
        }
    }
}

/// Teleportation and pointer selection are carried and logged only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XrExperienceOptions {
    pub session_mode: SessionMode,
    pub reference_space: ReferenceSpaceKind,
    pub teleportation: bool,
    pub pointer_selection: bool,
    /// Controller meshes are tracked but hidden unless this is set.
    pub show_controller_meshes: bool,
}

impl Default for XrExperienceOptions {
    fn default() -> Self {
        Self {
            session_mode: SessionMode::ImmersiveVr,
            reference_space: ReferenceSpaceKind::LocalFloor,
            teleportation: false,
            pointer_selection: false,
            show_controller_meshes: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub xr: XrExperienceOptions,
    pub show_inspector: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            xr: XrExperienceOptions::default(),
            show_inspector: true,
        }
    }
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

impl DemoConfig {
    /// Apply one override. Unknown keys are ignored and reported as `Ok(false)`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        match key {
            "teleport" | "teleportation" => self.xr.teleportation = parse_bool(key, value)?,
            "pointer" | "pointer-selection" => self.xr.pointer_selection = parse_bool(key, value)?,
            "controllers" => self.xr.show_controller_meshes = parse_bool(key, value)?,
            "inspector" => self.show_inspector = parse_bool(key, value)?,
            "mode" => self.xr.session_mode = SessionMode::parse(value)?,
            "space" => self.xr.reference_space = ReferenceSpaceKind::parse(value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Bad values keep the default and are logged.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match config.apply(key, value) {
                Ok(true) => log::info!("[config] {}={}", key, value),
                Ok(false) => log::debug!("[config] ignoring unknown key {:?}", key),
                Err(e) => log::warn!("[config] {}; keeping default", e),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_default_interactions() {
        let c = DemoConfig::default();
        assert!(!c.xr.teleportation);
        assert!(!c.xr.pointer_selection);
        assert!(!c.xr.show_controller_meshes);
        assert!(c.show_inspector);
        assert_eq!(c.xr.session_mode.as_str(), "immersive-vr");
        assert_eq!(c.xr.reference_space.as_str(), "local-floor");
    }

    #[test]
    fn query_overrides_apply() {
        let c = DemoConfig::from_query("?teleport=1&pointer=true&inspector=off&mode=immersive-ar&space=local");
        assert!(c.xr.teleportation);
        assert!(c.xr.pointer_selection);
        assert!(!c.show_inspector);
        assert_eq!(c.xr.session_mode, SessionMode::ImmersiveAr);
        assert_eq!(c.xr.reference_space, ReferenceSpaceKind::Local);
    }

    #[test]
    fn bare_flag_means_true() {
        let c = DemoConfig::from_query("controllers");
        assert!(c.xr.show_controller_meshes);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let c = DemoConfig::from_query("teleport=maybe&mode=vr&space=&utm_source=x");
        assert_eq!(c, DemoConfig::default());
    }

    #[test]
    fn apply_reports_errors_and_unknown_keys() {
        let mut c = DemoConfig::default();
        assert_eq!(c.apply("what", "1"), Ok(false));
        assert_eq!(
            c.apply("teleport", "2"),
            Err(ConfigError::InvalidValue {
                key: "teleport".into(),
                value: "2".into()
            })
        );
        assert_eq!(
            c.apply("mode", "vr"),
            Err(ConfigError::UnknownMode("vr".into()))
        );
    }
}
