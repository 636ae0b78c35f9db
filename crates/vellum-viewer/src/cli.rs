use clap::Parser;

use vellum_engine::coords::SurfaceSize;
use vellum_engine::device::GpuInit;
use vellum_engine::engine::EngineConfig;
use vellum_engine::logging::LoggingConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "vellum-viewer")]
#[command(about = "Drives the vellum engine from a desktop window", long_about = None)]
pub struct Cli {
    /// Initial surface width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial surface height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "vellum")]
    pub title: String,

    /// Log filter, e.g. "debug" or "vellum_engine=debug,wgpu=warn"
    #[arg(long)]
    pub log: Option<String>,

    /// Run the lifecycle without a window or GPU
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames (headless default: 3)
    #[arg(long)]
    pub frames: Option<u64>,

    /// Wait for vertical sync when presenting
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub vsync: bool,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::with_vsync(self.vsync)
    }

    pub fn engine_config(&self, size: SurfaceSize) -> EngineConfig {
        EngineConfig {
            initial_size: size,
            ..EngineConfig::default()
        }
    }

    /// Requested size as host integers, the way a platform reports it.
    pub fn requested_size(&self) -> (i32, i32) {
        (to_host(self.width), to_host(self.height))
    }
}

/// Saturating u32 → i32 for sizes handed to the engine's host entry points.
pub fn to_host(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let cli = Cli::parse_from(["vellum-viewer"]);
        assert_eq!((cli.width, cli.height), (800, 600));
        assert!(cli.vsync);
        assert!(!cli.headless);
        assert_eq!(cli.frames, None);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "vellum-viewer",
            "--headless",
            "--frames",
            "10",
            "--height",
            "0",
            "--vsync",
            "false",
        ]);
        assert!(cli.headless);
        assert_eq!(cli.frames, Some(10));
        assert_eq!(cli.requested_size(), (800, 0));
        assert!(!cli.vsync);
    }

    #[test]
    fn host_sizes_saturate() {
        assert_eq!(to_host(u32::MAX), i32::MAX);
        assert_eq!(to_host(7), 7);
    }
}
