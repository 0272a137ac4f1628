use crate::foundation::error::{FolioError, FolioResult};

/// Look and timing of the pointer grid overlay.
///
/// JSON keys are camelCase; every field is optional and falls back to the
/// default look.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    pub symbols: Vec<char>,
    /// Cell edge length in px.
    pub block_size: f64,
    /// A cell reacts when the pointer is strictly closer than this to its centre.
    pub detection_radius: f64,
    /// Cells lit per trigger, the hit cell included.
    pub cluster_size: usize,
    #[serde(rename = "blockLifetime")]
    pub block_lifetime_ms: u64,
    pub empty_ratio: f64,
    pub scramble_ratio: f64,
    #[serde(rename = "scrambleInterval")]
    pub scramble_interval_ms: u64,
    /// Fixed RNG seed for reproducible grids.
    pub seed: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            symbols: vec!['0', '1', 'X', '*', '#', '$', '&', '@', '!', '?'],
            block_size: 20.0,
            detection_radius: 50.0,
            cluster_size: 5,
            block_lifetime_ms: 500,
            empty_ratio: 0.3,
            scramble_ratio: 0.5,
            scramble_interval_ms: 100,
            seed: None,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FolioError::serde(format!("overlay config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FolioResult<()> {
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(FolioError::configuration(format!(
                "blockSize must be > 0, got {}",
                self.block_size
            )));
        }
        if !(self.detection_radius.is_finite() && self.detection_radius >= 0.0) {
            return Err(FolioError::configuration(format!(
                "detectionRadius must be >= 0, got {}",
                self.detection_radius
            )));
        }
        for (name, v) in [
            ("emptyRatio", self.empty_ratio),
            ("scrambleRatio", self.scramble_ratio),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(FolioError::configuration(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        if self.cluster_size == 0 {
            return Err(FolioError::configuration("clusterSize must be at least 1"));
        }
        if self.symbols.is_empty() && self.empty_ratio != 1.0 {
            return Err(FolioError::configuration(
                "symbols may only be empty when every cell is empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/config.rs"]
mod tests;
