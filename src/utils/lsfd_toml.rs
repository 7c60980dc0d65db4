//! Load `.lsfd.toml` (CLI only). Lib callers build [`Opts`](crate::Opts) directly.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::OutputMode;
use crate::engine::columns::parse_column_list;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LsfdToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    /// Same syntax as `--output`.
    output: Option<String>,
    threads: Option<usize>,
    json: Option<bool>,
    raw: Option<bool>,
    noheadings: Option<bool>,
    verbose: Option<bool>,
}

/// Load a config file. A missing file is `Ok(None)`; a malformed one is an error.
pub(crate) fn load_lsfd_toml(path: &Path) -> Result<Option<LsfdToml>> {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    let parsed = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(parsed))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $opts_field:ident) => {
        if let Some(v) = $idx.$idx_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &LsfdToml, opts: &mut Opts) -> Result<()> {
    let settings = &file.settings;
    if let Some(ref list) = settings.output {
        opts.columns = parse_column_list(list).context("config `output`")?;
    }
    if let Some(n) = settings.threads {
        if n == 0 {
            bail!("config `threads` must be at least 1");
        }
        opts.num_threads = Some(n);
    }
    if settings.raw == Some(true) {
        opts.output_mode = OutputMode::Raw;
    }
    if settings.json == Some(true) {
        opts.output_mode = OutputMode::Json;
    }
    apply_file_opt!(settings, opts, noheadings => noheadings);
    apply_file_opt!(settings, opts, verbose => verbose);
    Ok(())
}
