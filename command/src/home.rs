use anyhow::Result;
use anyhow::anyhow;
use dirs::home_dir;
use std::path::Path;
use std::path::PathBuf;

pub const HOME_ENV: &str = "ADJACENT_HOME";
const DEFAULT_DIR_NAME: &str = ".adjacent";

/// `--home`, then `$ADJACENT_HOME`, then `~/.adjacent`.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_home) = std::env::var(HOME_ENV)
        && !env_home.is_empty()
    {
        return Ok(PathBuf::from(env_home));
    }

    let mut home = home_dir().ok_or_else(|| anyhow!("Could not locate home directory"))?;
    home.push(DEFAULT_DIR_NAME);
    Ok(home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_home_wins() {
        let home = resolve_home(Some(Path::new("/tmp/adjacent-home"))).unwrap();
        assert_eq!(home, PathBuf::from("/tmp/adjacent-home"));
    }
}
