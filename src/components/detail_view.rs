use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{type_badge_style, ACCENT_GOLD, ACCENT_RED, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::detail::{resolve, DetailCard, DetailResolution};
use crate::model::capitalize;
use crate::repository::PokemonRepository;
use crate::route::DetailRoute;

pub struct DetailViewProps<'a> {
    pub route: &'a DetailRoute,
    pub repository: &'a PokemonRepository,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailView;

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<8}"), Style::default().fg(TEXT_DIM))
}

fn card_lines(card: &DetailCard) -> Vec<Line<'static>> {
    let mut types = vec![label("Tipos")];
    for kind in [&card.type_one, &card.type_two].into_iter().flatten() {
        types.push(Span::styled(format!(" {kind} "), type_badge_style(kind)));
        types.push(Span::raw(" "));
    }
    let source = if card.from_repository {
        "Creado por ti"
    } else {
        "PokeAPI"
    };

    vec![
        Line::from(vec![
            Span::styled(card.id_label(), Style::default().fg(ACCENT_GOLD)),
            Span::raw(" "),
            Span::styled(
                capitalize(&card.name),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        types.into(),
        Line::from(vec![label("Imagen"), Span::raw(card.image.clone())]),
        Line::from(vec![label("Origen"), Span::raw(source)]),
    ]
}

fn not_found_lines(id: Option<&str>, params: &[(String, String)]) -> Vec<Line<'static>> {
    let params = if params.is_empty() {
        "-".to_string()
    } else {
        params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        Line::from(Span::styled(
            "Pokémon no encontrado",
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("ID: {}", id.unwrap_or("-"))),
        Line::from(format!("Query Params: {params}")),
    ]
}

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Some(Action::NavigateBack),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut lines = match resolve(props.route, props.repository) {
            DetailResolution::Found(card) => card_lines(&card),
            DetailResolution::NotFound { id, params } => not_found_lines(id.as_deref(), &params),
        };
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Esc", Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(" Volver al inicio", Style::default().fg(TEXT_DIM)),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Detalles ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn render(route: &DetailRoute) -> String {
        let mut harness = RenderHarness::new(70, 14);
        let mut view = DetailView;
        let repository = PokemonRepository::new();
        harness.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                DetailViewProps {
                    route,
                    repository: &repository,
                    is_focused: true,
                },
            );
        })
    }

    #[test]
    fn renders_card_from_params() {
        let route = DetailRoute {
            id: Some("25".into()),
            name: Some("pikachu".into()),
            image: Some("https://img/25.png".into()),
            type_one: Some("electric".into()),
            type_two: None,
        };
        let output = render(&route);
        assert!(output.contains("#025 Pikachu"));
        assert!(output.contains("electric"));
        assert!(output.contains("https://img/25.png"));
        assert!(output.contains("PokeAPI"));
    }

    #[test]
    fn renders_not_found_with_params() {
        let route = DetailRoute {
            id: Some("abc".into()),
            name: Some("ghost".into()),
            ..DetailRoute::default()
        };
        let output = render(&route);
        assert!(output.contains("Pokémon no encontrado"));
        assert!(output.contains("ID: abc"));
        assert!(output.contains("Query Params: name=ghost"));
        assert!(output.contains("Volver al inicio"));
    }

    #[test]
    fn escape_goes_back() {
        let mut view = DetailView;
        let route = DetailRoute::default();
        let repository = PokemonRepository::new();
        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                DetailViewProps {
                    route: &route,
                    repository: &repository,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::NavigateBack);
    }
}
