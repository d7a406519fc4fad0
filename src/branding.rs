//! Header logo component
//!
//! Renders the brand mark at a fixed size. The result is an image node
//! descriptor for the app's rendering runtime.

use serde::{Deserialize, Serialize};

/// Bundled logo asset
pub const LOGO_ASSET: &str = "assets/images/logo.png";
pub const LOGO_WIDTH: u32 = 120;
pub const LOGO_HEIGHT: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    Contain,
}

/// Image node handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub resize_mode: ResizeMode,
}

/// Brand mark shown in screen headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderLogo;

impl HeaderLogo {
    pub fn render(&self) -> ImageNode {
        ImageNode {
            source: LOGO_ASSET.to_string(),
            width: LOGO_WIDTH,
            height: LOGO_HEIGHT,
            resize_mode: ResizeMode::Contain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_fixed_size() {
        let node = HeaderLogo.render();
        assert_eq!(node.width, LOGO_WIDTH);
        assert_eq!(node.height, LOGO_HEIGHT);
        assert_eq!(node, HeaderLogo::default().render());
    }

    #[test]
    fn test_render_json() {
        let value = serde_json::to_value(HeaderLogo.render()).unwrap();
        assert_eq!(value["source"], LOGO_ASSET);
        assert_eq!(value["resizeMode"], "contain");
    }
}
