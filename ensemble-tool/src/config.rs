use crate::common::*;

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    /// Merging parameters. Omitted fields take their defaults.
    #[serde(default)]
    pub ensemble: EnsembleInit,
    #[serde(default)]
    pub reps: RepsConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Self::from_json5(&text)
    }

    pub fn from_json5(text: &str) -> Result<Self> {
        let config: Self = json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters the ensemble or the rep counter would refuse later.
    pub fn validate(&self) -> Result<()> {
        self.ensemble
            .clone()
            .build()
            .context("invalid ensemble section")?;
        rep_counter::validate_smoothing(self.reps.smoothing_alpha)
            .context("invalid reps section")?;
        Ok(())
    }
}

/// Repetition counting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepsConfig {
    /// Weight of the previous frame in landmark smoothing.
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,
}

impl Default for RepsConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: default_smoothing_alpha(),
        }
    }
}

fn default_smoothing_alpha() -> f64 {
    rep_counter::DEFAULT_SMOOTHING_ALPHA
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}
