//! Token logo widget

use crate::detail::layout::TokenIconProps;
use crate::gui::helpers::{symbol_color, symbol_initials, IconCache};
use eframe::egui::{self, Align2, FontId, Sense};

/// Draw the token's icon file when it can be loaded, otherwise a colored
/// disc with the symbol's initials.
pub fn token_icon(ui: &mut egui::Ui, icons: &mut IconCache, props: &TokenIconProps) -> egui::Response {
    let side = props.size.points();
    let texture = props.icon.as_deref().and_then(|path| icons.get(ui.ctx(), path));

    let response = match texture {
        Some(texture) => ui.add(egui::Image::new(&texture).fit_to_exact_size(egui::vec2(side, side))),
        None => {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                painter.circle_filled(rect.center(), side / 2.0, symbol_color(&props.symbol));
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    symbol_initials(&props.symbol),
                    FontId::proportional(side * 0.38),
                    egui::Color32::WHITE,
                );
            }
            response
        }
    };
    response.on_hover_text(props.symbol.as_str())
}
