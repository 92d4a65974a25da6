// Typed option enums backing the user preferences

use serde::{Deserialize, Serialize};

/// Lighting theme: dark, light, or abiding the current system setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeBackground {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeBackground {
    pub const ALL: [Self; 3] = [Self::System, Self::Light, Self::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Accent color for the app chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeAccent {
    #[default]
    Purple,
    Blue,
}

impl ThemeAccent {
    pub const ALL: [Self; 2] = [Self::Purple, Self::Blue];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Blue => "blue",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Symbol drawn as the background frame of a task's completion indicator.
///
/// `symbol_name` is the icon-set name for the outline variant; when the fill
/// preference is on, consumers append ".fill" to get the filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFrame {
    App,
    Circle,
    Diamond,
    #[default]
    Roundsquare,
    Square,
}

impl IndicatorFrame {
    pub const ALL: [Self; 5] = [
        Self::App,
        Self::Circle,
        Self::Diamond,
        Self::Roundsquare,
        Self::Square,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Roundsquare => "roundsquare",
            Self::Square => "square",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }

    pub fn symbol_name(self, filled: bool) -> String {
        let base = match self {
            Self::App => "app",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Roundsquare => "square",
            Self::Square => "squareshape",
        };
        if filled {
            format!("{base}.fill")
        } else {
            base.to_string()
        }
    }
}

/// Symbol overlaid inside the frame when a task is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorSymbol {
    Asterisk,
    #[default]
    Checkmark,
    Scribble,
    Xmark,
}

impl IndicatorSymbol {
    pub const ALL: [Self; 4] = [Self::Asterisk, Self::Checkmark, Self::Scribble, Self::Xmark];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asterisk => "asterisk",
            Self::Checkmark => "checkmark",
            Self::Scribble => "scribble",
            Self::Xmark => "xmark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }

    pub fn symbol_name(self) -> &'static str {
        match self {
            Self::Asterisk => "asterisk",
            Self::Checkmark => "checkmark",
            Self::Scribble => "scribble.variable",
            Self::Xmark => "xmark",
        }
    }
}

/// Size and style of the quick-add button in the list UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAddButtonStyle {
    Large,
    #[default]
    Small,
    Material,
}

impl QuickAddButtonStyle {
    pub const ALL: [Self; 3] = [Self::Large, Self::Small, Self::Material];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Small => "small",
            Self::Material => "material",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

/// Date rendering for timestamps shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    American,
    #[default]
    International,
}

impl DateFormat {
    pub const ALL: [Self; 2] = [Self::American, Self::International];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::American => "american",
            Self::International => "international",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }

    /// strftime pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::American => "%m/%d/%Y",
            Self::International => "%Y-%m-%d",
        }
    }

    /// Render an epoch-seconds timestamp as a date string.
    ///
    /// Out-of-range timestamps render as an empty string.
    pub fn render(self, secs: f64) -> String {
        chrono::DateTime::from_timestamp(secs as i64, 0)
            .map(|dt| dt.format(self.pattern()).to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_table() {
        assert_eq!(ThemeBackground::default(), ThemeBackground::System);
        assert_eq!(ThemeAccent::default(), ThemeAccent::Purple);
        assert_eq!(IndicatorFrame::default(), IndicatorFrame::Roundsquare);
        assert_eq!(IndicatorSymbol::default(), IndicatorSymbol::Checkmark);
        assert_eq!(QuickAddButtonStyle::default(), QuickAddButtonStyle::Small);
        assert_eq!(DateFormat::default(), DateFormat::International);
    }

    #[test]
    fn test_raw_string_round_trip() {
        for v in ThemeBackground::ALL {
            assert_eq!(ThemeBackground::parse(v.as_str()), Some(v));
        }
        for v in ThemeAccent::ALL {
            assert_eq!(ThemeAccent::parse(v.as_str()), Some(v));
        }
        for v in IndicatorFrame::ALL {
            assert_eq!(IndicatorFrame::parse(v.as_str()), Some(v));
        }
        for v in IndicatorSymbol::ALL {
            assert_eq!(IndicatorSymbol::parse(v.as_str()), Some(v));
        }
        for v in QuickAddButtonStyle::ALL {
            assert_eq!(QuickAddButtonStyle::parse(v.as_str()), Some(v));
        }
        for v in DateFormat::ALL {
            assert_eq!(DateFormat::parse(v.as_str()), Some(v));
        }
    }

    #[test]
    fn test_unknown_raw_strings_do_not_parse() {
        assert_eq!(ThemeBackground::parse("sepia"), None);
        assert_eq!(IndicatorFrame::parse(""), None);
        assert_eq!(DateFormat::parse("ISO"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_raw_values() {
        let json = serde_json::to_string(&ThemeBackground::System).unwrap();
        assert_eq!(json, "\"system\"");
        let json = serde_json::to_string(&IndicatorFrame::Roundsquare).unwrap();
        assert_eq!(json, "\"roundsquare\"");
    }

    #[test]
    fn test_frame_symbol_names() {
        assert_eq!(IndicatorFrame::App.symbol_name(false), "app");
        assert_eq!(IndicatorFrame::Roundsquare.symbol_name(false), "square");
        assert_eq!(IndicatorFrame::Square.symbol_name(false), "squareshape");
        assert_eq!(IndicatorFrame::Circle.symbol_name(true), "circle.fill");
    }

    #[test]
    fn test_completion_symbol_names() {
        assert_eq!(IndicatorSymbol::Checkmark.symbol_name(), "checkmark");
        assert_eq!(IndicatorSymbol::Scribble.symbol_name(), "scribble.variable");
    }

    #[test]
    fn test_date_format_render() {
        // 2024-01-15 00:00:00 UTC
        let secs = 1_705_276_800.0;
        assert_eq!(DateFormat::International.render(secs), "2024-01-15");
        assert_eq!(DateFormat::American.render(secs), "01/15/2024");
    }
}
