//! Creation form: three text inputs and two type selectors.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::theme::{
    focus_border, type_badge_style, ACCENT_GOLD, ACCENT_RED, BG_HIGHLIGHT, BG_INPUT, BG_PANEL,
    TEXT_DIM, TEXT_MAIN,
};
use super::Component;
use crate::action::Action;
use crate::form::{FormField, PokemonForm};

const ROWS_PER_FIELD: usize = 3;

pub struct PokemonFormViewProps<'a> {
    pub form: &'a PokemonForm,
    pub is_focused: bool,
}

pub struct PokemonFormView {
    id: TextInput,
    name: TextInput,
    image: TextInput,
    was_open: bool,
}

impl Default for PokemonFormView {
    fn default() -> Self {
        Self {
            id: TextInput::new(),
            name: TextInput::new(),
            image: TextInput::new(),
            was_open: false,
        }
    }
}

impl PokemonFormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh inputs every time the form is entered.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            *self = Self {
                was_open: true,
                ..Self::default()
            };
        }
        self.was_open = is_open;
    }

    fn input(&mut self, field: FormField) -> Option<&mut TextInput> {
        match field {
            FormField::Id => Some(&mut self.id),
            FormField::Name => Some(&mut self.name),
            FormField::Image => Some(&mut self.image),
            FormField::TypeOne | FormField::TypeTwo => None,
        }
    }

    fn on_change(field: FormField) -> fn(String) -> Action {
        match field {
            FormField::Id => Action::FormIdChange,
            FormField::Name => Action::FormNameChange,
            _ => Action::FormImageChange,
        }
    }

    fn placeholder(field: FormField) -> &'static str {
        match field {
            FormField::Id => "1001",
            FormField::Name => "pikachu",
            _ => "https://ejemplo.com/imagen.png",
        }
    }

    fn input_style(is_focused: bool) -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(if is_focused { BG_HIGHLIGHT } else { BG_INPUT }),
                fg: Some(TEXT_MAIN),
            },
            placeholder_style: Some(Style::default().fg(TEXT_DIM)),
            cursor_style: None,
        }
    }
}

fn selector_line(form: &PokemonForm, field: FormField) -> Line<'static> {
    let arrow = Style::default().fg(ACCENT_GOLD);
    let value = match form.selection(field) {
        Some(kind) => Span::styled(format!(" {} ", kind.label()), type_badge_style(kind.as_str())),
        None if field == FormField::TypeOne => {
            Span::styled(" Selecciona un tipo ", Style::default().fg(TEXT_DIM))
        }
        None => Span::styled(" Ninguno ", Style::default().fg(TEXT_DIM)),
    };
    Line::from(vec![
        Span::styled(" ‹", arrow),
        value,
        Span::styled("›", arrow),
    ])
}

fn label_line(field: FormField, is_current: bool) -> Line<'static> {
    let marker = if is_current { "▸ " } else { "  " };
    let style = if is_current {
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Line::from(Span::styled(format!("{marker}{}", field.label()), style))
}

impl Component<Action> for PokemonFormView {
    type Props<'a> = PokemonFormViewProps<'a>;

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
        let focus = props.form.focus;

        match key.code {
            KeyCode::Esc => return vec![Action::NavigateBack],
            KeyCode::Enter => return vec![Action::FormSubmit],
            KeyCode::Tab | KeyCode::Down => return vec![Action::FormFocusNext],
            KeyCode::BackTab | KeyCode::Up => return vec![Action::FormFocusPrev],
            _ => {}
        }

        if focus.is_type_selector() {
            let delta = match key.code {
                KeyCode::Left => -1,
                KeyCode::Right | KeyCode::Char(' ') => 1,
                _ => return Vec::new(),
            };
            return vec![Action::FormTypeCycle {
                field: focus,
                delta,
            }];
        }

        let form = props.form;
        let Some(input) = self.input(focus) else {
            return Vec::new();
        };
        let input_props = TextInputProps {
            value: form.text(focus),
            placeholder: Self::placeholder(focus),
            is_focused: true,
            style: Self::input_style(true),
            on_change: Self::on_change(focus),
            on_submit: |_| Action::FormSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        input.handle_event(event, input_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let form = props.form;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Nuevo Pokémon ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(1); FormField::ALL.len() * ROWS_PER_FIELD];
        constraints.push(Constraint::Length(1)); // Submit
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (index, field) in FormField::ALL.into_iter().enumerate() {
            let base = index * ROWS_PER_FIELD;
            let is_current = props.is_focused && form.focus == field;

            frame.render_widget(Paragraph::new(label_line(field, is_current)), rows[base]);

            if field.is_type_selector() {
                let mut selector = Paragraph::new(selector_line(form, field));
                if is_current {
                    selector = selector.style(Style::default().bg(BG_HIGHLIGHT));
                }
                frame.render_widget(selector, rows[base + 1]);
            } else if let Some(input) = self.input(field) {
                let input_props = TextInputProps {
                    value: form.text(field),
                    placeholder: Self::placeholder(field),
                    is_focused: is_current,
                    style: Self::input_style(is_current),
                    on_change: Self::on_change(field),
                    on_submit: |_| Action::FormSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                input.render(frame, rows[base + 1], input_props);
            }

            if let Some(error) = form.errors.get(field) {
                let line = Line::from(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(ACCENT_RED),
                ));
                frame.render_widget(Paragraph::new(line), rows[base + 2]);
            }
        }

        let submit = Line::from(vec![
            Span::styled(
                "  Enter",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Crear Pokémon", Style::default().fg(TEXT_MAIN)),
        ]);
        frame.render_widget(
            Paragraph::new(submit),
            rows[FormField::ALL.len() * ROWS_PER_FIELD],
        );
    }
}
