//! Merged result list: one line per card.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::theme::{type_badge_style, ACCENT_GOLD, BG_HIGHLIGHT, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::model::{capitalize, format_id, PokemonRecord};

pub struct PokemonListProps<'a> {
    pub records: &'a [PokemonRecord],
    pub selected: usize,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

pub struct PokemonList {
    list: SelectList,
}

impl Default for PokemonList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl PokemonList {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `#025 Pikachu  electric ` with one coloured badge per type. User-created
/// cards carry a star.
pub fn card_line(record: &PokemonRecord) -> Line<'static> {
    let summary = record.summary();
    let mut spans = vec![
        Span::styled(format_id(summary.id), Style::default().fg(TEXT_DIM)),
        Span::raw(" "),
        Span::styled(
            capitalize(&summary.name),
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
        ),
    ];
    for kind in [summary.type_one, summary.type_two].into_iter().flatten() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {kind} "), type_badge_style(&kind)));
    }
    if !record.is_api() {
        spans.push(Span::styled(" ★", Style::default().fg(ACCENT_GOLD)));
    }
    Line::from(spans)
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(Style::default().bg(BG_HIGHLIGHT).add_modifier(Modifier::BOLD)),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn list_behavior() -> SelectListBehavior {
    SelectListBehavior {
        show_scrollbar: true,
        wrap_navigation: false,
    }
}

impl Component<Action> for PokemonList {
    type Props<'a> = PokemonListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.records.is_empty() {
            return Vec::new();
        }
        let items: Vec<Line<'static>> = props.records.iter().map(card_line).collect();
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(),
            behavior: list_behavior(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let items: Vec<Line<'static>> = props.records.iter().map(card_line).collect();
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: list_behavior(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, list_props);
    }
}
