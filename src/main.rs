//! Pokédex TUI - catalog search plus a local collection of custom Pokémon

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use pokedex::action::Action;
use pokedex::api::{HttpCatalog, DEFAULT_API_BASE};
use pokedex::components::{
    Component, DetailView, DetailViewProps, Footer, FooterProps, NavBar, NavBarProps,
    PokemonFormView, PokemonFormViewProps, SearchView, SearchViewProps,
};
use pokedex::config::{AppConfig, ConfigOverrides, DEFAULT_DEBOUNCE_MS};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::route::Route;
use pokedex::state::{AppState, TICK_MS};
use pokedex::store::FileSlot;
use pokedex::tasks::{handle_effect, Services};

/// Pokédex TUI - search PokeAPI and keep your own Pokémon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Search the PokeAPI catalog and create custom Pokémon")]
struct Args {
    /// Catalog base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Directory for the stored collection and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Quiet period before a typed query is searched (minimum 1)
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, value_parser = clap::value_parser!(u64).range(1..))]
    debounce_ms: u64,

    /// Start route, e.g. "/new" or "/pokemon/25"
    #[arg(long)]
    route: Option<String>,

    /// Log file (defaults to <data-dir>/pokedex.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug-level logging for this crate
    #[arg(long, short)]
    verbose: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Search,
    Form,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Search,
    Form,
    Detail,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        match self.route {
            Route::Search => Some(PokedexComponentId::Search),
            Route::NewPokemon => Some(PokedexComponentId::Form),
            Route::Detail(_) => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::Search => PokedexContext::Search,
            PokedexComponentId::Form => PokedexContext::Form,
            PokedexComponentId::Detail => PokedexContext::Detail,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Search
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        data_dir,
        debounce_ms,
        route,
        log_file,
        verbose,
        debug: debug_args,
    } = Args::parse();

    let config = AppConfig::resolve(ConfigOverrides {
        api_base: Some(api_base),
        data_dir,
        debounce_ms: Some(debounce_ms),
        route,
        log_file,
        verbose,
    })
    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    logging::init(&config.log_file, config.verbose)?;
    tracing::info!(
        api_base = %config.api_base,
        data_dir = %config.data_dir.display(),
        route = %config.start_route.to_path(),
        "starting pokedex"
    );

    let services = Arc::new(Services::new(
        FileSlot::new(config.data_dir.clone()),
        Arc::new(HttpCatalog::new(config.api_base.clone())),
        config.debounce,
    ));

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let start_route = config.start_route.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(start_route))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("pokedex exited");
    Ok(())
}

struct PokedexUi {
    nav: NavBar,
    search: SearchView,
    form: PokemonFormView,
    detail: DetailView,
    footer: Footer,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            nav: NavBar,
            search: SearchView::new(),
            form: PokemonFormView::new(),
            detail: DetailView,
            footer: Footer::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Navigation
            Constraint::Min(1),    // Current view
            Constraint::Length(1), // Footer
        ])
        .split(area);

        self.nav.render(frame, chunks[0], NavBarProps { route: &state.route });

        let is_focused = render_ctx.is_focused();
        let body = chunks[1];
        for id in [
            PokedexComponentId::Search,
            PokedexComponentId::Form,
            PokedexComponentId::Detail,
        ] {
            event_ctx.component_areas.remove(&id);
        }
        self.form.set_open(state.route == Route::NewPokemon);
        match &state.route {
            Route::Search => {
                event_ctx.set_component_area(PokedexComponentId::Search, body);
                self.search
                    .render(frame, body, SearchViewProps { state, is_focused });
            }
            Route::NewPokemon => {
                event_ctx.set_component_area(PokedexComponentId::Form, body);
                self.form.render(
                    frame,
                    body,
                    PokemonFormViewProps {
                        form: &state.form,
                        is_focused,
                    },
                );
            }
            Route::Detail(detail) => {
                event_ctx.set_component_area(PokedexComponentId::Detail, body);
                self.detail.render(
                    frame,
                    body,
                    DetailViewProps {
                        route: detail,
                        repository: &state.repository,
                        is_focused,
                    },
                );
            }
        }

        self.footer.render(
            frame,
            chunks[2],
            FooterProps {
                route: &state.route,
                message: state.message.as_ref(),
            },
        );
    }

    fn handle_global_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        match event {
            EventKind::Resize(width, height) => {
                HandlerResponse::action(Action::UiTerminalResize(*width, *height)).with_render()
            }
            EventKind::Key(_) if is_quit(event) => HandlerResponse::action(Action::Quit),
            EventKind::Key(_) => {
                let actions: Vec<_> = self
                    .nav
                    .handle_event(event, NavBarProps { route: &state.route })
                    .into_iter()
                    .collect();
                respond(actions)
            }
            _ => HandlerResponse::ignored(),
        }
    }

    fn handle_search_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        if is_quit(event) {
            return HandlerResponse::action(Action::Quit);
        }
        let actions: Vec<_> = self
            .search
            .handle_event(
                event,
                SearchViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        respond(actions)
    }

    fn handle_form_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        if is_quit(event) {
            return HandlerResponse::action(Action::Quit);
        }
        let actions: Vec<_> = self
            .form
            .handle_event(
                event,
                PokemonFormViewProps {
                    form: &state.form,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        respond(actions)
    }

    fn handle_detail_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        if is_quit(event) {
            return HandlerResponse::action(Action::Quit);
        }
        let Route::Detail(detail) = &state.route else {
            return HandlerResponse::ignored();
        };
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                DetailViewProps {
                    route: detail,
                    repository: &state.repository,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        respond(actions)
    }
}

/// Unhandled keys fall through to the global handler.
fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn is_quit(event: &EventKind) -> bool {
    matches!(
        event,
        EventKind::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Arc<Services<FileSlot>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> = EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(PokedexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_form = Rc::clone(&ui);
    bus.register(PokedexComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_global = Rc::clone(&ui);
    bus.register_global(move |event, state| {
        ui_global
            .borrow_mut()
            .handle_global_event(&event.kind, state)
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx.tasks(), services.clone()),
        )
        .await
}
