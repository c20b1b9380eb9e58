use std::path::Path;

use architect::{domain::Config, storage::PoolFile, Pool};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        use std::fs;

        let dot_dir = root.join(".larc");
        if dot_dir.exists() {
            anyhow::bail!("Workspace already initialized (found existing .larc directory)");
        }

        fs::create_dir_all(&dot_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create .larc directory: {e}"))?;

        let config_path = dot_dir.join("config.toml");
        let config = Config::default();
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        let pool_path = dot_dir.join("pool.json");
        PoolFile::from(Pool::new())
            .save_to_path(&pool_path)
            .map_err(|e| anyhow::anyhow!("Failed to create pool.json: {e}"))?;

        println!("Initialized content workspace in {}", root.display());
        println!("  Created: .larc/config.toml");
        println!("  Created: .larc/pool.json");
        println!();
        println!("Next steps:");
        println!("  larc create chinese-2A-001-1 --activity listening");
        println!("  larc add chinese-2A-001-1 1 --unit sentence --text \"你/吃/饭/了/吗\"");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::Command;

    #[test]
    fn init_creates_config_and_pool() {
        let tmp = tempdir().unwrap();

        Command {}.run(tmp.path()).expect("init should succeed");

        assert!(tmp.path().join(".larc/config.toml").exists());
        assert!(tmp.path().join(".larc/pool.json").exists());
    }

    #[test]
    fn init_refuses_to_reinitialize() {
        let tmp = tempdir().unwrap();

        Command {}.run(tmp.path()).unwrap();
        assert!(Command {}.run(tmp.path()).is_err());
    }
}
