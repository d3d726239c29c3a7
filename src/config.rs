use crate::error::{Result, TallyError};
use crate::types::config::TallyConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".tally/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/tally/config.toml";

/// Loads the layered config for the directory that holds a snapshot.
/// `None` means there is no `tally.toml` in `root`.
pub fn load_config(root: &Path) -> Result<Option<TallyConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<TallyConfig>> {
    let event_path = root.join(DEFAULT_CONFIG_FILE);
    if !event_path.exists() {
        return Ok(None);
    }

    // Later layers override earlier ones key by key.
    let layers = global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([event_path, root.join(DEFAULT_LOCAL_FILE)]);

    let mut merged = Value::Table(Map::new());
    for path in layers.filter(|path| path.exists()) {
        merge_toml(&mut merged, read_layer(&path)?);
        debug!(layer = %path.display(), "applied config layer");
    }

    let cfg: TallyConfig = merged.try_into()?;
    cfg.validate()?;
    Ok(Some(cfg))
}

fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| TallyError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Deep-merges `overlay` into `base`: tables merge per key, anything else
/// (scalars, arrays, a table meeting a scalar) is replaced by the overlay.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
