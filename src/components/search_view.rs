use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::theme::{
    focus_border, ACCENT_GOLD, ACCENT_GREEN, ACCENT_RED, BG_INPUT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use super::{Component, PokemonList, PokemonListProps};
use crate::action::Action;
use crate::state::{AppState, SearchFocus, SearchStatus};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const PLACEHOLDER: &str = "Buscar Pokémon por nombre...";

pub struct SearchViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct SearchView {
    input: TextInput,
    list: PokemonList,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: PokemonList::new(),
        }
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: focus_border(false),
                    focused_style: Some(focus_border(true)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_INPUT),
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: None,
        }
    }
}

pub fn status_line(state: &AppState) -> Line<'static> {
    match state.search_status() {
        SearchStatus::Idle | SearchStatus::NotFound(_) | SearchStatus::Empty => Line::default(),
        SearchStatus::Loading => {
            let frame = SPINNER[(state.tick as usize) % SPINNER.len()];
            Line::from(vec![
                Span::styled(format!("{frame} "), Style::default().fg(ACCENT_GOLD)),
                Span::styled("Buscando Pokémon...", Style::default().fg(TEXT_DIM)),
            ])
        }
        SearchStatus::Error(message) => Line::from(Span::styled(
            message,
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )),
        SearchStatus::Count(total) => Line::from(Span::styled(
            format!("Se encontraron {total} Pokémon"),
            Style::default().fg(ACCENT_GREEN),
        )),
    }
}

fn empty_state(status: &SearchStatus) -> Option<Vec<Line<'static>>> {
    let headline = match status {
        SearchStatus::NotFound(query) => format!("No se encontraron resultados para \"{query}\""),
        SearchStatus::Empty => "No se encontraron resultados".to_string(),
        _ => return None,
    };
    Some(vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Intenta con otro nombre o crea un nuevo Pokémon",
            Style::default().fg(TEXT_DIM),
        )),
    ])
}

impl Component<Action> for SearchView {
    type Props<'a> = SearchViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let search = &props.state.search;

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            return vec![Action::SearchFocusToggle];
        }

        match search.focus {
            SearchFocus::Results => match key.code {
                KeyCode::Enter => vec![Action::SearchOpen],
                KeyCode::Esc => vec![Action::SearchFocusToggle],
                _ => {
                    let records = props.state.merged_records();
                    self.list
                        .handle_event(
                            event,
                            PokemonListProps {
                                records: &records,
                                selected: search.selected,
                                is_focused: true,
                                on_select: Action::SearchSelect,
                            },
                        )
                        .into_iter()
                        .collect()
                }
            },
            SearchFocus::Input => {
                if key.code == KeyCode::Down && props.state.merged_len() > 0 {
                    return vec![Action::SearchFocusToggle];
                }
                let input_props = TextInputProps {
                    value: &search.input,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    style: Self::input_style(),
                    on_change: Action::SearchQueryChange,
                    on_submit: Action::SearchQuerySubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let search = &state.search;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Buscar Pokémon ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status
            Constraint::Min(1),    // Cards
        ])
        .split(inner);

        let input_props = TextInputProps {
            value: &search.input,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused && search.focus == SearchFocus::Input,
            style: Self::input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchQuerySubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        frame.render_widget(Paragraph::new(status_line(state)), chunks[1]);

        let status = state.search_status();
        if let Some(lines) = empty_state(&status) {
            let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
            frame.render_widget(paragraph, chunks[2]);
            return;
        }

        let records = state.merged_records();
        self.list.render(
            frame,
            chunks[2],
            PokemonListProps {
                records: &records,
                selected: search.selected,
                is_focused: props.is_focused && search.focus == SearchFocus::Results,
                on_select: Action::SearchSelect,
            },
        );
    }
}
