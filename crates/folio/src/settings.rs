use crate::prelude::*;
use folio_core::config::{ConfigError, ViewConfig};
use std::fs;
use std::path::PathBuf;

/// View settings shared by the subcommands that paginate
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ViewOptions {
    /// TOML file with `items_per_page`, `max_visible_pages` and `scroll_to_top`
    #[arg(long, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of page buttons in the pagination bar
    #[arg(long, env = "FOLIO_MAX_VISIBLE")]
    pub max_visible: Option<usize>,

    /// Items per page
    #[arg(long, env = "FOLIO_PER_PAGE")]
    pub per_page: Option<usize>,

    /// Do not scroll back to the top after changing page
    #[arg(long)]
    pub no_scroll: bool,
}

impl ViewOptions {
    /// Load the config file (if any) and apply command line overrides on top of it
    pub fn resolve(&self) -> Result<ViewConfig> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                ViewConfig::from_toml_str(&text)
                    .map_err(|e| eyre!("Invalid config file {}: {}", path.display(), e))?
            }
            None => ViewConfig::default(),
        };

        let config = apply_overrides(base, self).map_err(|e| eyre!("{}", e))?;
        log::debug!("resolved view config: {:?}", config);
        Ok(config)
    }
}

/// Apply flag values over a base config
pub fn apply_overrides(
    mut config: ViewConfig,
    options: &ViewOptions,
) -> Result<ViewConfig, ConfigError> {
    if let Some(max_visible) = options.max_visible {
        config.max_visible_pages = max_visible;
    }
    if let Some(per_page) = options.per_page {
        config.items_per_page = per_page;
    }
    if options.no_scroll {
        config.scroll_to_top = false;
    }

    config.validate()?;
    Ok(config)
}
