//! Built-in catalog revisions

use crate::config::{CatalogConfig, ConfigError};

/// Named built-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// compileSdk 33 revision
    Api33,
    /// compileSdk 34 revision
    #[default]
    Api34,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Api33, Preset::Api34];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Api33 => "api33",
            Preset::Api34 => "api34",
        }
    }

    /// Comma-separated names of every preset
    pub fn names() -> String {
        Preset::ALL.map(|preset| preset.as_str()).join(", ")
    }

    /// Raw TOML source of the preset
    pub fn source(&self) -> &'static str {
        match self {
            Preset::Api33 => include_str!("../../presets/api33.toml"),
            Preset::Api34 => include_str!("../../presets/api34.toml"),
        }
    }

    pub fn catalog(&self) -> Result<CatalogConfig, ConfigError> {
        CatalogConfig::from_toml_str(self.source())
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Preset::Api33)]
    #[case(Preset::Api34)]
    fn every_preset_parses(#[case] preset: Preset) {
        assert!(preset.catalog().is_ok());
    }

    #[rstest]
    #[case("api33", Preset::Api33)]
    #[case("api34", Preset::Api34)]
    fn from_str_round_trips_names(#[case] name: &str, #[case] expected: Preset) {
        let preset: Preset = name.parse().unwrap();
        assert_eq!(preset, expected);
        assert_eq!(preset.as_str(), name);
    }

    #[test]
    fn from_str_rejects_unknown_preset() {
        let err = "api99".parse::<Preset>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown preset: api99. Available presets: api33, api34"
        );
    }

    #[test]
    fn every_listed_preset_parses_from_its_name() {
        for preset in Preset::ALL {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), preset);
            assert!(Preset::names().contains(preset.as_str()));
        }
    }

    #[test]
    fn default_preset_is_api34() {
        assert_eq!(Preset::default(), Preset::Api34);
    }
}
