// Imports
use ornament_compose::RasterBackend;
use serde::{Deserialize, Serialize};

/// Decorator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "decorator_config")]
pub struct DecoratorConfig {
    /// Pre-render the decorations of each partition into a buffer that is replayed on draw.
    #[serde(rename = "cache")]
    pub cache: bool,
    /// Emit warnings for usage that is likely not intended.
    #[serde(rename = "verbose")]
    pub verbose: bool,
    /// The backend used by the shape entry points that don't take one explicitly.
    #[serde(rename = "default_backend")]
    pub default_backend: RasterBackend,
    /// The cached buffer bounds are loosened by this margin on all sides.
    #[serde(rename = "buffer_margin", with = "ornament_compose::serialize::f64_dp3")]
    pub buffer_margin: f64,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            cache: false,
            verbose: true,
            default_backend: RasterBackend::default(),
            buffer_margin: Self::BUFFER_MARGIN_DEFAULT,
        }
    }
}

impl DecoratorConfig {
    pub const BUFFER_MARGIN_DEFAULT: f64 = 1.0;

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}
