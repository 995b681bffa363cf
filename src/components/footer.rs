use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::theme::{ACCENT_GOLD, ACCENT_GREEN, ACCENT_RED, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::route::Route;
use crate::state::StatusMessage;

pub struct FooterProps<'a> {
    pub route: &'a Route,
    pub message: Option<&'a StatusMessage>,
}

pub struct Footer {
    status_bar: StatusBar,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl Footer {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn route_hints(route: &Route) -> Vec<StatusBarHint<'static>> {
    let mut hints = match route {
        Route::Search => vec![
            StatusBarHint::new("Tab", "lista"),
            StatusBarHint::new("Enter", "buscar/abrir"),
        ],
        Route::NewPokemon => vec![
            StatusBarHint::new("Tab", "campo"),
            StatusBarHint::new("←/→", "tipo"),
            StatusBarHint::new("Enter", "crear"),
            StatusBarHint::new("Esc", "volver"),
        ],
        Route::Detail(_) => vec![StatusBarHint::new("Esc", "volver")],
    };
    hints.push(StatusBarHint::new("^C", "salir"));
    hints
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let hints = route_hints(props.route);
        let message_span = match props.message {
            Some(message) => {
                let color = if message.is_error { ACCENT_RED } else { ACCENT_GREEN };
                Span::styled(
                    message.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            }
            None => Span::raw(""),
        };
        let items = [StatusBarItem::span(message_span)];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&items),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn shows_message_and_hints() {
        let mut render = RenderHarness::new(100, 1);
        let mut footer = Footer::new();
        let message = StatusMessage::info("¡Pokémon creado exitosamente!");
        let output = render.render_to_string_plain(|frame| {
            footer.render(
                frame,
                frame.area(),
                FooterProps {
                    route: &Route::Search,
                    message: Some(&message),
                },
            );
        });
        assert!(output.contains("¡Pokémon creado exitosamente!"));
        assert!(output.contains("salir"));
    }
}
