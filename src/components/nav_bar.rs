use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_GOLD, BG_PANEL, TEXT_DIM};
use super::Component;
use crate::action::Action;
use crate::route::{DetailRoute, Route};

/// Entries in display order: key, label.
const ENTRIES: [(&str, &str); 3] = [("F1", "Home"), ("F2", "Nuevo Pokémon"), ("F3", "Detalles")];

pub struct NavBarProps<'a> {
    pub route: &'a Route,
}

#[derive(Default)]
pub struct NavBar;

impl NavBar {
    fn active_index(route: &Route) -> usize {
        match route {
            Route::Search => 0,
            Route::NewPokemon => 1,
            Route::Detail(_) => 2,
        }
    }

    fn target(index: usize) -> Option<Route> {
        match index {
            0 => Some(Route::Search),
            1 => Some(Route::NewPokemon),
            2 => Some(Route::Detail(DetailRoute::default())),
            _ => None,
        }
    }
}

impl Component<Action> for NavBar {
    type Props<'a> = NavBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        let index = match key.code {
            KeyCode::F(n @ 1..=3) => usize::from(n - 1),
            _ => return None,
        };
        // Re-selecting the detail tab keeps the current detail route.
        if index == Self::active_index(props.route) && index == 2 {
            return None;
        }
        Self::target(index).map(Action::NavigateTo)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let titles: Vec<Line> = ENTRIES
            .iter()
            .map(|(key, label)| Line::from(format!("{key} {label}")))
            .collect();
        let tabs = Tabs::new(titles)
            .select(Self::active_index(props.route))
            .style(Style::default().fg(TEXT_DIM).bg(BG_PANEL))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("|");
        frame.render_widget(tabs, area);
    }
}
