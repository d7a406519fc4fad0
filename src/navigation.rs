//! Navigation layout declarations for the mobile app
//!
//! Each app section is a stack container. Every stack hides the header and
//! slides new screens in from the right. These are static declarations
//! handed to the navigation runtime as screen-options JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level app sections that own a navigation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppSection {
    /// Sign-in and sign-up screens
    Auth,
    /// First-run setup (target language, level, organization)
    Onboarding,
    /// Signed-in app: lessons, vocabulary, roleplays, practice
    Home,
}

impl AppSection {
    pub const ALL: [AppSection; 3] = [AppSection::Auth, AppSection::Onboarding, AppSection::Home];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppSection::Auth => "auth",
            AppSection::Onboarding => "onboarding",
            AppSection::Home => "home",
        }
    }
}

impl fmt::Display for AppSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Screen transition animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackAnimation {
    SlideFromRight,
}

/// Options applied to every screen of a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOptions {
    pub header_shown: bool,
    pub animation: StackAnimation,
}

/// Stack layout of one app section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackLayout {
    pub section: AppSection,
    pub screen_options: ScreenOptions,
}

impl StackLayout {
    /// Returns the layout declared for `section`.
    pub fn for_section(section: AppSection) -> Self {
        Self {
            section,
            screen_options: ScreenOptions {
                header_shown: false,
                animation: StackAnimation::SlideFromRight,
            },
        }
    }
}

/// Layouts for every section, in [`AppSection::ALL`] order.
pub fn all_layouts() -> Vec<StackLayout> {
    AppSection::ALL
        .iter()
        .map(|s| StackLayout::for_section(*s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_section_hides_header_and_slides() {
        for layout in all_layouts() {
            assert!(!layout.screen_options.header_shown);
            assert_eq!(layout.screen_options.animation, StackAnimation::SlideFromRight);
        }
        assert_eq!(all_layouts().len(), 3);
    }

    #[test]
    fn test_screen_options_json() {
        let layout = StackLayout::for_section(AppSection::Onboarding);
        let value = serde_json::to_value(layout).unwrap();
        assert_eq!(
            value,
            json!({
                "section": "onboarding",
                "screenOptions": { "headerShown": false, "animation": "slide_from_right" }
            })
        );
    }

    #[test]
    fn test_section_display() {
        assert_eq!(AppSection::Home.to_string(), "home");
    }
}
