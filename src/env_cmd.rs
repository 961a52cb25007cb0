use std::fs;

use camino::Utf8PathBuf;
use color_eyre::{eyre::Context, Result};
use log::info;

// The build tree is fixed; both setup and clean walk this exact list.
const RPM_TREE: &[&str] = &[
    "rpm/BUILD",
    "rpm/RPMS/athlon",
    "rpm/RPMS/i386",
    "rpm/RPMS/i486",
    "rpm/RPMS/i586",
    "rpm/RPMS/i686",
    "rpm/RPMS/noarch",
    "rpm/SOURCES",
    "rpm/SPECS",
    "rpm/SRPMS",
];

/// Creates or removes the RPM build tree under `root`.
pub struct EnvCmd {
    pub clean: bool,
    pub root: Utf8PathBuf,
}

impl EnvCmd {
    pub fn run(&self) -> Result<()> {
        if self.clean {
            self.clean_tree()
        } else {
            self.setup_tree()
        }
    }

    /// Creates every directory of the build tree, intermediate directories
    /// included. An already-existing leaf is an error; there is no rollback
    /// of the directories created so far.
    fn setup_tree(&self) -> Result<()> {
        for dir in RPM_TREE {
            let path = self.root.join(dir);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("unable to create directory {parent:?}"))?;
            }
            fs::create_dir(&path)
                .with_context(|| format!("unable to create directory {path:?}"))?;
            info!("Created {path}");
        }

        Ok(())
    }

    /// Removes the build tree in reverse order, one directory at a time.
    /// Each directory must be empty; the first failed removal aborts the
    /// run. After each removal, now-empty ancestors up to `root` are pruned
    /// silently.
    fn clean_tree(&self) -> Result<()> {
        for dir in RPM_TREE.iter().rev() {
            let path = self.root.join(dir);
            fs::remove_dir(&path)
                .with_context(|| format!("unable to remove directory {path:?}"))?;
            info!("Removed {path}");
            let mut parent = path.parent();
            while let Some(ancestor) = parent {
                if ancestor == self.root || fs::remove_dir(ancestor).is_err() {
                    break;
                }
                parent = ancestor.parent();
            }
        }

        Ok(())
    }
}
