//! Path mapping for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Host mount point inside the sandbox.
const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace file.
///
/// `/host` is the directory Zellij was started from, usually the home
/// directory, so this typically lands in `~/.local/share/zellij/starscope`.
///
/// ```
/// use starscope::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/starscope")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local")
        .join("share")
        .join("zellij")
        .join("starscope")
}

/// Maps `~` and `~/...` onto the host mount; other paths pass through.
///
/// ```
/// use starscope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_user_paths_are_left_alone() {
        assert_eq!(expand_tilde("~other/file"), "~other/file");
    }
}
