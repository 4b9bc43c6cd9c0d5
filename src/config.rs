//! Server configuration, fixed at startup.
//!
//! There are no config files and no runtime flags. You build a
//! [`ServeConfig`], hand it to [`CaseChain::new`](crate::CaseChain::new),
//! and that is the configuration for the life of the process.

use std::env;

/// What the server serves and how it runs scripts.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory request paths map onto.
    pub root: String,
    /// File-name suffix that marks a resource as runnable.
    pub script_ext: String,
    /// Program invoked to run a script, with the script path as its sole
    /// argument.
    pub interpreter: String,
}

impl ServeConfig {
    /// Serve `root`, running `*.py` files through `python3`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            script_ext: ".py".to_owned(),
            interpreter: "python3".to_owned(),
        }
    }

    /// Serve the process current working directory.
    pub fn current_dir() -> Self {
        let root = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| ".".to_owned());
        Self::new(root)
    }

    /// Override which files count as scripts and what runs them.
    pub fn script(mut self, ext: impl Into<String>, interpreter: impl Into<String>) -> Self {
        self.script_ext = ext.into();
        self.interpreter = interpreter.into();
        self
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self::current_dir()
    }
}
