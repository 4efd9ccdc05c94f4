//! Configuration for a renfiles run.
//!
//! Values are layered with [`figment`]: built-in defaults, then the
//! configuration file (TOML, YAML or JSON, picked by extension), then
//! `RENFILES_*` environment variables (`RENFILES_SRC_DIR_NAME` overrides
//! `srcDirName`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::value::Uncased;
use renfiles_classify::Layout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config directory.
pub const FILE_NAME: &str = "renfiles.toml";
/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "RENFILES_";

/// Immutable settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Downloads folder holding documents and installers.
    pub src_dir_name: PathBuf,
    /// Archive root.
    pub dest_dir_name: PathBuf,
    pub podcast_src_dir_name: PathBuf,
    pub podcast_dest_dir_name: PathBuf,
    /// Folder holding `.bentodb` backups; the Bento source is skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bento_src_dir_name: Option<PathBuf>,
    /// Folder holding dated Shakehands backup folders; skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shakehands_src_dir_name: Option<PathBuf>,
    /// Defaults to `<destDirName>/done/diary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diary_dir_name: Option<PathBuf>,
    /// Defaults to `tag` on the `PATH`, else `/usr/local/bin/tag`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_command: Option<PathBuf>,
    /// Dry run: print what would happen, touch nothing.
    pub test_mode: bool,
    pub debug_mode: bool,
}
impl Default for Config {
    fn default() -> Self {
        let here = PathBuf::from(".");
        Self {
            src_dir_name: here.clone(),
            dest_dir_name: here.clone(),
            podcast_src_dir_name: here.clone(),
            podcast_dest_dir_name: here,
            bento_src_dir_name: None,
            shakehands_src_dir_name: None,
            diary_dir_name: None,
            tag_command: None,
            test_mode: false,
            debug_mode: false,
        }
    }
}

impl Config {
    /// Find the configuration file and load it.
    ///
    /// Lookup order: `explicit` (when given), `./renfiles.toml`, then
    /// `renfiles.toml` in the user's config directory. An explicit path that
    /// does not exist is an error even if a default location would work.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::candidates()
                .into_iter()
                .find(|candidate| candidate.is_file())
                .ok_or_raise(|| ErrorKind::NotFound(PathBuf::from(FILE_NAME)))?,
        };
        Self::load(path)
    }

    /// Default locations, in lookup order.
    pub fn candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("", "", "renfiles") {
            candidates.push(dirs.config_dir().join(FILE_NAME));
        }
        candidates
    }

    /// Load the configuration from a file, with defaults and environment
    /// overrides applied.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let figment = match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file_exact(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            Some("json") => figment.merge(Json::file_exact(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        };
        // Keys are camel-cased here, so figment must not lowercase them again.
        let env = Env::prefixed(ENV_PREFIX)
            .lowercase(false)
            .map(|key| Uncased::from(to_camel_case(key.as_str())));
        let config: Self = figment
            .merge(env)
            .extract()
            .or_raise(|| ErrorKind::Invalid(path.to_path_buf()))?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Dry run requested by the configuration.
    pub fn dry_run(&self) -> bool {
        self.test_mode
    }

    /// Destination roots for the classifiers.
    pub fn layout(&self) -> Layout {
        Layout::new(&self.dest_dir_name)
            .with_diary(self.diary_dir_name.clone())
            .with_podcasts(&self.podcast_dest_dir_name)
    }
}

/// `src_dir_name` → `srcDirName`.
fn to_camel_case(key: &str) -> String {
    let mut camel = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            camel.extend(c.to_uppercase());
            upper = false;
        } else {
            camel.extend(c.to_lowercase());
        }
    }
    camel
}
