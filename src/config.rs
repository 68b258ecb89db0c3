//! Page configuration: the two target names and the element ids the page is
//! wired against.

use crate::error::PageError;

pub const DEFAULT_GIRL_TARGET: &str = "Shann";
pub const DEFAULT_BOY_TARGET: &str = "Lio";

/// Runtime configuration. Only the target names are meant to change between
/// deployments; everything else is fixed choreography.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub girl_target: String,
    pub boy_target: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            girl_target: DEFAULT_GIRL_TARGET.to_string(),
            boy_target: DEFAULT_BOY_TARGET.to_string(),
        }
    }
}

impl PageConfig {
    /// An empty target would leave its field permanently "complete", which
    /// opens the gate without any typing.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.girl_target.is_empty() {
            return Err(PageError::Config("girl_target must not be empty".into()));
        }
        if self.boy_target.is_empty() {
            return Err(PageError::Config("boy_target must not be empty".into()));
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let cfg: PageConfig =
            serde_json::from_str(json).map_err(|e| PageError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Element ids and selectors the page markup must provide.
pub mod ids {
    pub const GIRL_INPUT: &str = "girlName";
    pub const BOY_INPUT: &str = "boyName";
    pub const CALCULATE_BTN: &str = "calculateBtn";
    pub const BTN_WRAPPER: &str = "btn-wrapper";
    pub const NAVBAR: &str = "navbar";
    pub const CALCULATOR: &str = "calculator-section";
    pub const LOADING: &str = "loading-section";
    pub const RESULTS: &str = "results-section";
    pub const TIMELINE: &str = "timeline-section";
    pub const MESSAGE: &str = "valentine-message";
    pub const FOOTER: &str = "footer";
    pub const SCROLL_HINT: &str = "scroll-hint";
    pub const RING_FILL: &str = "ring-fill";
    pub const PERCENTAGE: &str = "percentage";
    pub const HEARTS: &str = "hearts-container";
    pub const SOUND: &str = "fah-sound";

    pub const RESULT_REVEAL_SELECTOR: &str = ".result-reveal";
    pub const TIMELINE_ITEM_SELECTOR: &str = ".timeline-item";
    pub const CHOICE_GROUP_SELECTOR: &str = ".choice-buttons";
    pub const CHOICE_BTN_SELECTOR: &str = ".choice-btn";
    pub const FOOTER_LINK_SELECTOR: &str = ".footer-links a";
}
