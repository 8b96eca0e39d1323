//! Centralized theme and styling system for the GUI
//!
//! Layout measurements are named [`StyleToken`]s resolved by [`AppTheme`], so
//! views ask for "the tab panel offset" rather than hard-coding pixels.

use eframe::egui;

/// Named layout measurements used by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    /// Padding inside every card
    CardPadding,
    /// Gap between the cards of the detail page
    CardGap,
    /// Offset of a card's body below its header
    CardContentOffset,
    /// Offset of the tab strip below the actions header
    TabsOffset,
    /// Offset of the visible tab panel below the tab strip
    TabPanelOffset,
    /// Offset of the chart plot below its header
    ChartOffset,
    /// Fixed width of the transactions card
    ActionsWidth,
    /// Width of the label column in overview rows
    InfoLabelWidth,
    /// Vertical gap between overview rows
    InfoRowGap,
    /// Padding around the large token logo
    TokenLogoPadding,
    /// Gap between the token logo and the info column
    OverviewGap,
    /// Height of the performance plot
    ChartHeight,
}

/// Centralized theme and styling system
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub card: egui::Color32,
    pub card_background: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,
    /// Overview row labels
    pub on_surface_sh1: egui::Color32,
    /// Back button text
    pub on_surface_h2: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub error: egui::Color32,
    pub link: egui::Color32,

    // Chart colors
    pub chart_line: egui::Color32,
    pub chart_grid: egui::Color32,

    // Typography
    pub title_size: f32,
    pub header_size: f32,
    pub sub_header_size: f32,
    pub row_text_size: f32,

    pub rounding: f32,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Deep navy dashboard palette with cyan accents
            background: egui::Color32::from_rgb(10, 14, 26),
            surface: egui::Color32::from_rgb(22, 28, 46),
            surface_hover: egui::Color32::from_rgb(32, 40, 64),
            card: egui::Color32::from_rgb(16, 21, 36),
            card_background: egui::Color32::from_rgb(10, 14, 26),
            text_primary: egui::Color32::from_rgb(230, 234, 245),
            text_secondary: egui::Color32::from_rgb(140, 150, 175),
            on_surface_sh1: egui::Color32::from_rgb(160, 170, 195),
            on_surface_h2: egui::Color32::from_rgb(200, 208, 228),

            primary: egui::Color32::from_rgb(0, 122, 255),
            secondary: egui::Color32::from_rgb(0, 204, 214),
            success: egui::Color32::from_rgb(46, 204, 113),
            error: egui::Color32::from_rgb(255, 85, 85),
            link: egui::Color32::from_rgb(90, 170, 255),

            chart_line: egui::Color32::from_rgb(0, 204, 214),
            chart_grid: egui::Color32::from_rgb(40, 48, 72),

            title_size: 18.0,
            header_size: 20.0,
            sub_header_size: 15.0,
            row_text_size: 14.0,

            rounding: 8.0,
        }
    }
}

impl AppTheme {
    /// Resolve a layout token to points
    pub fn space(&self, token: StyleToken) -> f32 {
        match token {
            StyleToken::CardPadding => 20.0,
            StyleToken::CardGap => 16.0,
            StyleToken::CardContentOffset => 4.0,
            StyleToken::TabsOffset => 12.0,
            StyleToken::TabPanelOffset => 15.0,
            StyleToken::ChartOffset => 24.0,
            StyleToken::ActionsWidth => 416.0,
            StyleToken::InfoLabelWidth => 96.0,
            StyleToken::InfoRowGap => 6.0,
            StyleToken::TokenLogoPadding => 22.0,
            StyleToken::OverviewGap => 47.0,
            StyleToken::ChartHeight => 260.0,
        }
    }

    /// Top-level card frame
    pub fn frame_card(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.card)
            .rounding(self.rounding)
            .inner_margin(self.space(StyleToken::CardPadding))
    }

    /// Nested "surface" card used for About/Strategies
    pub fn frame_surface(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(self.rounding)
            .inner_margin(self.space(StyleToken::CardPadding))
    }

    /// Inset card behind the large token logo
    pub fn frame_logo(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.card_background)
            .rounding(self.rounding)
            .inner_margin(self.space(StyleToken::TokenLogoPadding))
    }

    pub fn button_back(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.on_surface_h2))
            .fill(self.surface)
            .rounding(self.rounding)
            .min_size(egui::vec2(180.0, 32.0))
    }

    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(egui::Color32::WHITE).strong())
            .fill(self.primary)
            .rounding(self.rounding)
            .min_size(egui::vec2(140.0, 36.0))
    }

    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .min_size(egui::vec2(56.0, 24.0))
    }

    /// Card header ("Overview", "Transactions", ...)
    pub fn header(&self, text: &str) -> egui::RichText {
        egui::RichText::new(text)
            .size(self.header_size)
            .strong()
            .color(self.text_primary)
    }

    /// Sub header inside a surface card ("About", "Strategies")
    pub fn sub_header(&self, text: &str) -> egui::RichText {
        egui::RichText::new(text)
            .size(self.sub_header_size)
            .strong()
            .color(self.text_secondary)
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.background;
    visuals.override_text_color = Some(theme.text_primary);
    visuals.hyperlink_color = theme.link;

    visuals.widgets.noninteractive.bg_fill = theme.card;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_hover;
    visuals.selection.bg_fill = theme.primary;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.chart_grid);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(22.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_card_is_fixed_width() {
        let theme = AppTheme::default();
        assert_eq!(theme.space(StyleToken::ActionsWidth), 416.0);
    }

    #[test]
    fn test_panel_offsets_are_ordered() {
        let theme = AppTheme::default();
        assert!(theme.space(StyleToken::CardContentOffset) < theme.space(StyleToken::TabsOffset));
        assert!(theme.space(StyleToken::TabsOffset) < theme.space(StyleToken::TabPanelOffset));
        assert!(theme.space(StyleToken::TabPanelOffset) < theme.space(StyleToken::ChartOffset));
    }
}
