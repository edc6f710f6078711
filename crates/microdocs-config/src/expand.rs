//! `${VAR}` references in configuration strings.

use std::env::VarError;

use crate::ConfigError;

/// Expand environment variable references in an optional field, in place.
///
/// `${VAR}` must be set; `${VAR:-fallback}` uses the fallback when `VAR` is
/// unset or empty. A bare `$` (as in `$VAR` or `costs $5`) is left alone.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    let Some(raw) = value.as_mut() else {
        return Ok(());
    };
    if !raw.contains("${") {
        return Ok(());
    }

    let expanded = shellexpand::env_with_context(raw.as_str(), |name| {
        std::env::var(name).map(Some)
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: match err.cause {
            VarError::NotPresent => format!("${{{}}} not set", err.var_name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", err.var_name),
        },
    })?
    .into_owned();

    *raw = expanded;
    Ok(())
}
