use std::path::PathBuf;

use crate::foundation::error::{PikuraError, PikuraResult};

/// Execution settings for strip generation.
///
/// Geometry and theme colors are fixed; these settings only affect how the work is scheduled and
/// where glyph fonts come from.
#[derive(Clone, Debug)]
pub struct StripSettings {
    /// Normalize frames and rasterize stickers on a worker pool.
    pub parallel: bool,
    /// Worker thread count, `None` for the rayon default.
    pub threads: Option<usize>,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` glyph fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Load the operating system's installed fonts.
    pub load_system_fonts: bool,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

impl StripSettings {
    /// Defaults overridden by `PIKURA_PARALLEL`, `PIKURA_THREADS` and `PIKURA_FONT_DIR`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("PIKURA_PARALLEL") {
            self.parallel = !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }
        if let Some(n) = var("PIKURA_THREADS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.threads = Some(n);
        }
        if let Some(dirs) = var("PIKURA_FONT_DIR") {
            self.font_dirs
                .extend(std::env::split_paths(&dirs).filter(|p| !p.as_os_str().is_empty()));
        }
        self
    }

    pub(crate) fn build_thread_pool(&self) -> PikuraResult<rayon::ThreadPool> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(PikuraError::validation(
                "strip settings 'threads' must be >= 1 when set",
            ));
        }

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = self.threads {
            builder = builder.num_threads(n);
        }
        builder
            .build()
            .map_err(|e| PikuraError::validation(format!("failed to build rayon thread pool: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
