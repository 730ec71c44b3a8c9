// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the config file and default exports live.
//
// Only resolves paths; `AppServices::init` creates the directory so a failure
// there can fall back to the temp dir instead of being ignored.

use std::path::PathBuf;

const APP_DIR: &str = "indicadores";

/// The application data directory for the current environment.
pub fn data_dir() -> PathBuf {
    resolve(|key| std::env::var(key).ok())
}

/// `$XDG_DATA_HOME/indicadores`, else `$HOME/.local/share/indicadores`, else
/// the temp dir. Relative or empty values are skipped, as XDG requires.
fn resolve(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let absolute = |key: &str| {
        var(key)
            .map(PathBuf::from)
            .filter(|path| path.is_absolute())
    };

    let base = absolute("XDG_DATA_HOME")
        .or_else(|| absolute("HOME").map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir);
    base.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn xdg_data_home_wins() {
        let dir = resolve(env(&[("XDG_DATA_HOME", "/data"), ("HOME", "/home/ana")]));
        assert_eq!(dir, PathBuf::from("/data/indicadores"));
    }

    #[test]
    fn relative_or_empty_xdg_falls_back_to_home() {
        for xdg in ["", "relative/share"] {
            let dir = resolve(env(&[("XDG_DATA_HOME", xdg), ("HOME", "/home/ana")]));
            assert_eq!(dir, PathBuf::from("/home/ana/.local/share/indicadores"));
        }
    }

    #[test]
    fn no_usable_home_uses_temp_dir() {
        let dir = resolve(env(&[("HOME", "")]));
        assert_eq!(dir, std::env::temp_dir().join("indicadores"));
    }
}
