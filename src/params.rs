//! Parameters collected for a bootstrap run.

use std::path::{Path, PathBuf};

/// User-supplied inputs for one bootstrap run.
///
/// Values come from CLI flags when given, otherwise from interactive
/// prompts. None of them are format-validated; the external tools receive
/// them as-is and report their own errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    /// Name of the project directory to create; also the compose project name.
    pub project_name: String,
    /// MySQL database to create and wire into the env file.
    pub db_name: String,
    /// Host port mapped to MySQL's 3306 in the compose file.
    pub db_port: String,
}

impl RunParams {
    /// Resolve the project root under the invocation directory.
    pub fn project_root(&self, base: &Path) -> PathBuf {
        base.join(&self.project_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_joins_name() {
        let params = RunParams {
            project_name: "shop-api".to_string(),
            db_name: "shop".to_string(),
            db_port: "3307".to_string(),
        };
        assert_eq!(
            params.project_root(Path::new("/work")),
            PathBuf::from("/work/shop-api")
        );
    }
}
