//! Color definitions for charts

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#0A0A0C"; // Near black
pub(super) const COLOR_TEXT: &str = "#FFFFFF"; // White
pub(super) const COLOR_MUTED: &str = "#A0A0A8"; // Card captions
pub(super) const COLOR_GRID: &str = "#505050"; // Grid lines
pub(super) const COLOR_CARD: &str = "#16161A"; // Metric card fill

/// Gradient for bars without a category color
pub(super) struct BarGradient {
    pub(super) start: &'static str,
    pub(super) end: &'static str,
}

/// Rankings: blue family, states: green family, sections: purple family
pub(super) const COUNTRY_BARS: BarGradient = BarGradient {
    start: "#68B4FF", // Blue
    end: "#1888F8",   // Vivid blue
};
pub(super) const STATE_BARS: BarGradient = BarGradient {
    start: "#48F89C", // Green
    end: "#10D878",   // Vivid green
};
pub(super) const SECTION_BARS: BarGradient = BarGradient {
    start: "#A478FF", // Purple
    end: "#7840F8",   // Vivid purple
};

/// Line colors for flows in the timeline, cycled by flow index
pub(super) const FLOW_COLORS: [&str; 4] = [
    "#68B4FF", // Blue
    "#FF68A8", // Pink
    "#F8A800", // Orange
    "#48F89C", // Green
];
