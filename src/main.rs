mod app;
mod config;
mod event;
mod focus;
mod model;
mod nav;
mod store;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use focus::tray::InputSource;
use model::course::CourseStore;
use nav::controller::RenderMode;
use store::prefs::DurableStore;
use store::session::SessionStore;
use ui::components::content::ContentPane;
use ui::components::dropdown::DropdownList;
use ui::components::nav_strip::NavStrip;
use ui::components::tray::TrayPanel;
use ui::layout::ScreenLayout;

#[derive(Parser)]
#[command(name = "courser", version, about = "Terminal course-content viewer")]
struct Cli {
    #[arg(short, long, help = "Course to open: bundled name or path to a manifest")]
    course: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short = 'w', long, help = "Width in columns below which the compact layout is used")]
    width_breakpoint: Option<u16>,

    #[arg(long, help = "Right-to-left reading order (swaps the chevron glyphs)")]
    rtl: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(course) = cli.course {
        config.course = course;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(breakpoint) = cli.width_breakpoint {
        config.width_breakpoint = breakpoint;
    }
    if cli.rtl {
        config.rtl = true;
    }
    config.normalize();

    let store = load_course(&config.course)?;
    let mut app = App::new(
        store,
        config,
        Box::new(SessionStore::open()),
        Box::new(DurableStore::open()),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// A name that resolves on disk is a manifest path; anything else is looked
/// up among the bundled courses.
fn load_course(name: &str) -> Result<CourseStore> {
    let path = Path::new(name);
    if path.exists() {
        return Ok(CourseStore::load(path)?);
    }
    CourseStore::load_bundled(name).map_err(|err| {
        anyhow::anyhow!(
            "{err} (bundled courses: {})",
            CourseStore::bundled_courses().join(", ")
        )
    })
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let size = terminal.size()?;
    app.apply_size(size.width, size.height);

    loop {
        terminal.draw(|frame| render(frame, app))?;
        // Each draw is one frame for the deferred focus hops.
        app.on_frame();

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(w, h) => app.on_resize(w, h),
            AppEvent::Message(msg) => app.handle_message(&msg),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Course => handle_course_key(app, key),
        AppScreen::CourseExit => handle_exit_key(app, key),
    }
}

fn handle_course_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => {
            if app.dropdown_open {
                app.close_dropdown();
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Left => app.arrow(false),
        KeyCode::Right => app.arrow(true),
        // Up/Down never move focus within the strip.
        KeyCode::Up | KeyCode::Down => {}
        KeyCode::Tab => app.tab_key(true),
        KeyCode::BackTab => app.tab_key(false),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused(InputSource::Keyboard),
        KeyCode::Char('t') => app.toggle_tray(InputSource::Keyboard),
        KeyCode::Char('s') => app.toggle_sidebar_preference(),
        KeyCode::Char('b') => app.toggle_bookmark(),
        KeyCode::Char('m') => app.toggle_complete(),
        _ => {}
    }
}

fn handle_exit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('r') => app.return_from_exit(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Course => render_course(frame, app),
        AppScreen::CourseExit => render_exit(frame, app),
    }
}

fn render_course(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let tray_open = app.tray_visible();
    let layout = ScreenLayout::new(
        area,
        app.config.width_breakpoint,
        app.has_banner(),
        tray_open,
    );

    let plan = app.plan();
    let position_text = match &plan.position {
        Some(pos) => {
            let total = app
                .current_sequence()
                .map(|s| s.unit_ids.len())
                .unwrap_or(0);
            format!(" {} of {}", pos.index + 1, total)
        }
        None => String::new(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " courser ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}{position_text}", app.store.meta().title),
            Style::default().fg(colors.fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    if let Some(banner_area) = layout.banner
        && let Some(text) = app.current_sequence().and_then(|s| s.banner_text.as_deref())
    {
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(colors.banner_fg()).bg(colors.banner_bg()),
        )))
        .style(Style::default().bg(colors.banner_bg()));
        frame.render_widget(banner, banner_area);
    }

    let strip = NavStrip::new(&plan, &app.focus, app.theme);
    frame.render_widget(strip, layout.strip);

    if tray_open && layout.view.is_compact() {
        // Compact viewports give the tray the whole content area.
        let tray = TrayPanel::new(&app.store.meta().title, &app.focus, app.theme, true);
        frame.render_widget(tray, layout.content);
    } else {
        let content = ContentPane::new(app.current_sequence(), app.current_unit(), app.theme);
        frame.render_widget(content, layout.content);
        if let Some(sidebar_area) = layout.sidebar {
            let tray = TrayPanel::new(&app.store.meta().title, &app.focus, app.theme, false);
            frame.render_widget(tray, sidebar_area);
        }
    }

    if app.dropdown_open
        && let RenderMode::Dropdown { items, .. } = &plan.mode
    {
        let popup = ui::layout::centered_rect(60, 60, layout.content);
        frame.render_widget(Clear, popup);
        let list = DropdownList::new(items, &app.focus, app.theme);
        frame.render_widget(list, popup);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [←→] Focus  [Tab] Cycle  [Enter] Activate  [t] Tray  [s] Sidebar  [q] Quit ",
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_exit(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(50, 40, area);
    let block = Block::bordered()
        .title(" Course complete ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    frame.render_widget(block, centered);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} ", app.store.meta().title),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " You have reached the end of the course.",
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " [Enter] Back to course  [q] Quit",
            Style::default().fg(colors.muted()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
