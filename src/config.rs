use crate::bank::catalog::{
    ARTS, CRITICAL, DIGITAL, EMOTIONAL, ENTERPRISE, LEADERSHIP, LOGIC, MAKING, MOVEMENT, NATURE,
    PEOPLE, SCIENCE, TECHNOLOGY, WELLBEING, WORDS,
};
use crate::bank::QuestionBank;
use crate::core::strengths::{ContentLibrary, DEFAULT_TOP_N, DimensionContent};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "jagged.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Resolves the bank path relative to the config file that named it.
    pub fn bank_path(&self) -> Option<PathBuf> {
        let path = self.config.bank.path.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        let base = self
            .source
            .as_ref()
            .and_then(|source| source.parent())
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(path))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub bank: BankConfig,
    pub content: ContentLibrary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            bank: BankConfig::default(),
            content: default_content(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub top_n: usize,
    pub json: bool,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            json: false,
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Suggestions for every dimension of the built-in bank.
pub fn default_content() -> ContentLibrary {
    let mut library = ContentLibrary::default();
    for (dimension, learning, careers) in DEFAULT_CONTENT {
        library.insert(
            *dimension,
            DimensionContent {
                learning: learning.iter().map(|s| s.to_string()).collect(),
                careers: careers.iter().map(|s| s.to_string()).collect(),
            },
        );
    }
    library
}

type ContentRow = (&'static str, &'static [&'static str], &'static [&'static str]);

const DEFAULT_CONTENT: &[ContentRow] = &[
    (
        NATURE,
        &["Field ecology projects", "Environmental science courses"],
        &["Ecologist", "Conservation officer", "Environmental engineer"],
    ),
    (
        LOGIC,
        &["Competitive maths and logic puzzles", "Introductory statistics"],
        &["Data analyst", "Actuary", "Software engineer"],
    ),
    (
        WORDS,
        &["Creative writing workshops", "Debate and public speaking"],
        &["Journalist", "Editor", "Communications specialist"],
    ),
    (
        PEOPLE,
        &["Peer mentoring", "Community volunteering"],
        &["Teacher", "Social worker", "Community organiser"],
    ),
    (
        MAKING,
        &["Maker-space projects", "Design and technology"],
        &["Mechanical engineer", "Product designer", "Carpenter"],
    ),
    (
        MOVEMENT,
        &["Sports science", "Coaching courses"],
        &["Physiotherapist", "Fitness coach", "Sports scientist"],
    ),
    (
        ARTS,
        &["Studio art and music", "Drama and performance"],
        &["Illustrator", "Musician", "Set designer"],
    ),
    (
        TECHNOLOGY,
        &["Programming and robotics clubs", "Electronics kits"],
        &["Software developer", "Robotics engineer", "IT consultant"],
    ),
    (
        ENTERPRISE,
        &["Student enterprise programmes", "Project management basics"],
        &["Entrepreneur", "Product manager", "Business analyst"],
    ),
    (
        CRITICAL,
        &["Philosophy and ethics", "Research methods"],
        &["Researcher", "Policy analyst", "Lawyer"],
    ),
    (
        EMOTIONAL,
        &["Psychology introductions", "Conflict resolution training"],
        &["Counsellor", "Psychologist", "HR specialist"],
    ),
    (
        DIGITAL,
        &["Video editing and animation", "Digital illustration"],
        &["Video producer", "UX designer", "Animator"],
    ),
    (
        SCIENCE,
        &["Science fair experiments", "Laboratory skills"],
        &["Laboratory scientist", "Physicist", "Biomedical researcher"],
    ),
    (
        LEADERSHIP,
        &["Student council and team captaincy", "Event organising"],
        &["Team lead", "Operations manager", "Event manager"],
    ),
    (
        WELLBEING,
        &["Mindfulness practice", "Health and wellbeing studies"],
        &["Wellbeing coach", "Occupational therapist", "Nurse"],
    ),
];

/// The bank named in config, or the built-in battery.
pub fn resolve_bank(
    loaded: &LoadedConfig,
    cli_bank: Option<&Path>,
) -> Result<Cow<'static, QuestionBank>> {
    let path = match cli_bank {
        Some(path) => Some(path.to_path_buf()),
        None => loaded.bank_path(),
    };

    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using custom question bank");
            Ok(Cow::Owned(QuestionBank::load(&path)?))
        }
        None => Ok(Cow::Borrowed(QuestionBank::builtin())),
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}
