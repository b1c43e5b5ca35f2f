use arboard::Clipboard;
use macroquad::prelude::*;
use pathviz::config::{Config, LoggingConfig};
use pathviz::layout;
use pathviz::save_state::SaveState;
use pathviz::{CellState, Editor, Grid, Search, Step, Strategy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EMPTY_COLOR: Color = WHITE;
const BARRIER_COLOR: Color = BLACK;
const START_COLOR: Color = Color::new(1.0, 0.65, 0.0, 1.0);
const END_COLOR: Color = Color::new(0.25, 0.88, 0.82, 1.0);
const OPEN_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
const CLOSED_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const PATH_COLOR: Color = Color::new(0.5, 0.0, 0.5, 1.0);
const LINE_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const BUTTON_IDLE: Color = WHITE;
const BUTTON_HOVER: Color = Color::new(0.27, 0.27, 0.27, 1.0);

fn cell_color(state: CellState) -> Color {
    match state {
        CellState::Empty => EMPTY_COLOR,
        CellState::Barrier => BARRIER_COLOR,
        CellState::Start => START_COLOR,
        CellState::End => END_COLOR,
        CellState::Open => OPEN_COLOR,
        CellState::Closed => CLOSED_COLOR,
        CellState::Path => PATH_COLOR,
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Editor,
}

/// Editor state: the painted grid plus the search being animated, if any
struct App {
    config: Config,
    grid: Grid,
    editor: Editor,
    strategy: Strategy,
    search: Option<Search>,
    last_step: Option<Step>,
    message: String,
}

impl App {
    fn new(config: Config) -> Self {
        let grid = Grid::new(config.grid.cells_per_side(), config.grid.cell_size());
        App {
            strategy: config.search.default_strategy,
            config,
            grid,
            editor: Editor::new(),
            search: None,
            last_step: None,
            message: String::new(),
        }
    }

    fn open_editor(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        self.search = None;
        self.editor.reset(&mut self.grid);
        self.message = format!("{} - space to run", strategy.label());
        info!(strategy = strategy.label(), "editor opened");
    }

    fn handle_mouse(&mut self) {
        if self.search.is_some() {
            return;
        }
        let (mx, my) = mouse_position();
        let Some(pos) = self.grid.cell_at_pixel(mx, my) else {
            return;
        };
        if is_mouse_button_down(MouseButton::Left) {
            self.editor.paint(&mut self.grid, pos);
        } else if is_mouse_button_down(MouseButton::Right) {
            self.editor.erase(&mut self.grid, pos);
        }
    }

    fn start_search(&mut self) {
        let Some((start, end)) = self.editor.endpoints() else {
            self.message = "place a start and an end first".to_string();
            return;
        };
        self.grid.clear_search_marks();
        self.grid.update_neighbors();
        match Search::new(&self.grid, start, end, self.strategy) {
            Ok(search) => {
                info!(strategy = self.strategy.label(), %start, %end, "search started");
                self.message = format!("{} running...", self.strategy.label());
                self.last_step = None;
                self.search = Some(search);
            }
            Err(e) => {
                warn!(error = %e, "cannot start search");
                self.message = e.to_string();
            }
        }
    }

    /// Advance the running search by up to `steps_per_frame` expansions
    fn advance_search(&mut self) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        let mut last_step = self.last_step;
        let mut finished = None;

        for _ in 0..self.config.search.steps_per_frame.max(1) {
            match search.step(&mut self.grid, &mut |step, _grid: &Grid| last_step = Some(step)) {
                Ok(phase) if phase.is_terminal() => {
                    finished = search.outcome().map(Ok);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    finished = Some(Err(e));
                    break;
                }
            }
        }
        self.last_step = last_step;

        let Some(result) = finished else {
            return;
        };
        self.search = None;
        self.message = match result {
            Ok(outcome) => {
                let stats = outcome.stats();
                match outcome.path_len() {
                    Some(len) => {
                        info!(length = len, expanded = stats.expanded, "path found");
                        format!("path length {len}, {} cells expanded", stats.expanded)
                    }
                    None => {
                        info!(expanded = stats.expanded, "no path");
                        format!("no path, {} cells expanded", stats.expanded)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                e.to_string()
            }
        };
    }

    fn abort_search(&mut self) -> bool {
        if self.search.take().is_some() {
            info!("search aborted");
            self.message = "search aborted".to_string();
            true
        } else {
            false
        }
    }

    fn copy_to_clipboard(&mut self) {
        let text = layout::render(&self.grid);
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("grid layout copied to clipboard");
                    self.message = "layout copied".to_string();
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn save(&mut self) {
        let path = self.config.persistence.save_path.clone();
        match SaveState::from_grid(&self.grid).save_to_file(&path) {
            Ok(()) => {
                info!(%path, "grid saved");
                self.message = format!("saved to {path}");
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.message = e.to_string();
            }
        }
    }

    fn load(&mut self) {
        let path = self.config.persistence.save_path.clone();
        let restored = SaveState::load_from_file(&path)
            .and_then(|state| state.restore_grid(self.config.grid.cell_size()));
        match restored {
            Ok(grid) => {
                self.editor = Editor::from_grid(&grid);
                self.grid = grid;
                info!(%path, "grid loaded");
                self.message = format!("loaded {path}");
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                self.message = e.to_string();
            }
        }
    }

    fn draw_grid(&self) {
        clear_background(EMPTY_COLOR);
        let size = self.grid.cell_size;
        for cell in self.grid.cells() {
            let (x, y) = self.grid.cell_origin(cell.pos);
            draw_rectangle(x, y, size, size, cell_color(cell.state()));
        }

        if self.config.visual.show_grid_lines {
            let extent = self.grid.size as f32 * size;
            for i in 0..self.grid.size {
                let offset = i as f32 * size;
                draw_line(0.0, offset, extent, offset, 1.0, LINE_COLOR);
                draw_line(offset, 0.0, offset, extent, 1.0, LINE_COLOR);
            }
        }

        // Outline the cell the running search touched last
        if let (Some(_), Some(Step::Expanded(pos) | Step::Traced(pos))) = (&self.search, self.last_step) {
            let (x, y) = self.grid.cell_origin(pos);
            draw_rectangle_lines(x, y, size, size, 2.0, BLUE);
        }

        if !self.message.is_empty() {
            let dims = measure_text(&self.message, None, 20, 1.0);
            draw_rectangle(0.0, 0.0, dims.width + 12.0, 26.0, Color::new(0.0, 0.0, 0.0, 0.6));
            draw_text(&self.message, 6.0, 19.0, 20.0, WHITE);
        }
    }
}

fn draw_button(rect: Rect, label: &str) -> bool {
    let (mx, my) = mouse_position();
    let hovered = rect.contains(vec2(mx, my));
    let (fill, text) = if hovered { (BUTTON_HOVER, WHITE) } else { (BUTTON_IDLE, BLACK) };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_text(label, rect.x + 10.0, rect.y + 34.0, 30.0, text);
    hovered && is_mouse_button_pressed(MouseButton::Left)
}

/// Returns the chosen strategy, if a button was clicked this frame
fn draw_menu(default_strategy: Strategy) -> Option<Strategy> {
    clear_background(Color::from_rgba(30, 30, 30, 255));
    draw_text("Main Menu", 20.0, 40.0, 30.0, WHITE);
    draw_text(
        &format!("Enter: {}   Esc: quit", default_strategy.label()),
        20.0,
        300.0,
        20.0,
        GRAY,
    );

    let astar = draw_button(Rect::new(50.0, 100.0, 200.0, 50.0), Strategy::AStar.label());
    let dijkstra = draw_button(Rect::new(50.0, 200.0, 200.0, 50.0), Strategy::Dijkstra.label());

    if astar {
        Some(Strategy::AStar)
    } else if dijkstra {
        Some(Strategy::Dijkstra)
    } else if is_key_pressed(KeyCode::Enter) {
        Some(default_strategy)
    } else {
        None
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.window_size as i32,
        window_height: config.grid.window_size as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    init_logging(&config.logging);
    info!(size = config.grid.cells_per_side(), "starting path finding visualizer");

    let mut app = App::new(config);
    let mut screen = Screen::Menu;

    loop {
        match screen {
            Screen::Menu => {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }
                if let Some(strategy) = draw_menu(app.config.search.default_strategy) {
                    app.open_editor(strategy);
                    screen = Screen::Editor;
                }
            }
            Screen::Editor => {
                if is_key_pressed(KeyCode::Escape) && !app.abort_search() {
                    screen = Screen::Menu;
                    next_frame().await;
                    continue;
                }

                app.handle_mouse();

                if app.search.is_none() {
                    if is_key_pressed(KeyCode::Space) {
                        app.start_search();
                    }
                    if is_key_pressed(KeyCode::R) {
                        app.editor.reset(&mut app.grid);
                        app.message.clear();
                    }
                    if is_key_pressed(KeyCode::S) {
                        app.save();
                    }
                    if is_key_pressed(KeyCode::L) {
                        app.load();
                    }
                }
                if is_key_pressed(KeyCode::C) {
                    app.copy_to_clipboard();
                }

                app.advance_search();
                app.draw_grid();
            }
        }

        next_frame().await
    }

    info!("quit");
}
