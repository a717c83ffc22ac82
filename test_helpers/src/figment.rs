//! Shared helpers for running configuration tests inside `figment::Jail`.
//!
//! A jail gives each test its own working directory and environment, so
//! `yamleo.toml` discovery and `YAMLEO_*` variables can be exercised without
//! leaking into other tests.

use anyhow::{Context, Result, anyhow};
use figment::Jail;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    let mut captured = None;
    Jail::try_with(|jail| {
        captured = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    captured.context("jail closure did not run")
}

/// Like [`with_jail`], but first writes each `(name, contents)` pair in
/// `files` to the jail directory and sets each `(key, value)` pair in `env`.
///
/// # Errors
///
/// Returns an error if a file cannot be written, or for the same reasons as
/// [`with_jail`].
///
/// # Examples
///
/// ```
/// use yamleo_test_helpers::figment::with_settings_jail;
///
/// let arrays = with_settings_jail(
///     &[("yamleo.toml", "marker = \"!\"\n")],
///     &[("YAMLEO_ARRAYS", "indexed")],
///     |_| Ok(std::env::var("YAMLEO_ARRAYS").unwrap_or_default()),
/// )?;
/// assert_eq!(arrays, "indexed");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_settings_jail<F, T>(files: &[(&str, &str)], env: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    with_jail(|jail| {
        for (name, contents) in files {
            jail.create_file(name, contents)?;
        }
        for (key, value) in env {
            jail.set_env(key, value);
        }
        f(jail)
    })
}
