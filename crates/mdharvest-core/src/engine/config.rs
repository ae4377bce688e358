use serde::{Deserialize, Serialize};

/// How often the candidate lists are computed within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionScope {
    /// Scan around the first mention only and reuse its filtered lists for every other mention.
    #[default]
    PerDocument,
    /// Scan around every mention independently.
    PerMention,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub context_radius: usize,
    pub resolution_scope: ResolutionScope,
    pub include_water_model_type: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfigBuilder::new().build()
    }
}

#[derive(Default)]
pub struct ExtractionConfigBuilder {
    context_radius: Option<usize>,
    resolution_scope: Option<ResolutionScope>,
    include_water_model_type: Option<bool>,
}

impl ExtractionConfigBuilder {
    pub const DEFAULT_CONTEXT_RADIUS: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_radius(mut self, radius: usize) -> Self {
        self.context_radius = Some(radius);
        self
    }
    pub fn resolution_scope(mut self, scope: ResolutionScope) -> Self {
        self.resolution_scope = Some(scope);
        self
    }
    pub fn include_water_model_type(mut self, include: bool) -> Self {
        self.include_water_model_type = Some(include);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        ExtractionConfig {
            context_radius: self
                .context_radius
                .unwrap_or(Self::DEFAULT_CONTEXT_RADIUS),
            resolution_scope: self.resolution_scope.unwrap_or_default(),
            include_water_model_type: self.include_water_model_type.unwrap_or(false),
        }
    }
}
