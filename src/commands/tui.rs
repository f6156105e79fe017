use std::io;
use std::time::{Duration, Instant};

use clap::Args;
use crossterm::cursor::Show;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::block::{Position, Title};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Runtime;
use crate::background::{Background, asset_url};
use crate::errors::CliError;
use crate::format::{Segment, segments};
use crate::session::{DRAFT_PLACEHOLDER, Message, MessageKind, Session, TYPING_TEXT};
use crate::tui::handlers::async_ops::spawn_background_ticker;
use crate::tui::handlers::{handle_event, handle_tui_msg};
use crate::tui::types::*;

#[derive(Debug, Args, Default)]
pub struct TuiArgs {
    /// Seconds between backdrop changes (overrides config)
    #[arg(long = "rotate-secs")]
    pub rotate_secs: Option<u64>,
    /// Start with the chat panel already open
    #[arg(long)]
    pub open: bool,
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self, CliError> {
        enable_raw_mode()
            .map_err(|e| CliError::Generic(format!("Failed to enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| CliError::Generic(format!("Failed to enter alternate screen: {e}")))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, Show, LeaveAlternateScreen);
    }
}

pub async fn handle(runtime: &Runtime, args: TuiArgs) -> Result<(), CliError> {
    if runtime.output.json {
        return Err(CliError::Usage(
            "`--json` is not supported for `cosmo tui`.".to_string(),
        ));
    }

    let api = runtime.api_client()?;
    let rotate_secs = args
        .rotate_secs
        .filter(|s| *s > 0)
        .unwrap_or(runtime.config.rotate_secs);

    let session = Session::new(Background::new(runtime.config.backgrounds.clone()));
    let mut app = App::new(
        session,
        api.base_url().to_string(),
        runtime.resolved_asset_base(),
    );
    app.logo = runtime.config.logo.clone();
    app.avatar = runtime.config.avatar.clone();
    if args.open {
        app.session.toggle_panel();
    }

    let guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| CliError::Generic(format!("Failed to init terminal: {e}")))?;
    terminal
        .clear()
        .map_err(|e| CliError::Generic(format!("Failed to clear terminal: {e}")))?;

    let (tx, mut rx) = mpsc::unbounded_channel::<TuiMsg>();
    let ticker = spawn_background_ticker(Duration::from_secs(rotate_secs), tx.clone());
    tracing::info!(api = %app.api_url, rotate_secs, "widget started");

    loop {
        app.follow_new_messages();
        update_spinner(&mut app);
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::Generic(format!("Failed to draw: {e}")))?;

        if app.should_quit {
            break;
        }

        while let Ok(msg) = rx.try_recv() {
            handle_tui_msg(&mut app, msg);
        }

        let poll_ms = if app.session.is_typing() { 50 } else { 120 };
        if crossterm::event::poll(Duration::from_millis(poll_ms))
            .map_err(|e| CliError::Generic(format!("Event poll failed: {e}")))?
        {
            let event = crossterm::event::read()
                .map_err(|e| CliError::Generic(format!("Event read failed: {e}")))?;
            if let Err(err) = handle_event(&api, &tx, &mut app, event) {
                tracing::warn!("key handler failed: {err}");
                app.status = format!("Error: {err}");
            }
        }
    }

    drop(ticker);
    tracing::info!(
        messages = app.session.messages().len(),
        outstanding = app.session.outstanding(),
        "widget closed"
    );
    terminal
        .show_cursor()
        .map_err(|e| CliError::Generic(format!("Failed to restore cursor: {e}")))?;
    drop(guard);
    Ok(())
}

// Base UI animation cadence for the typing dots.
const SPINNER_INTERVAL_MS: u64 = 275;

fn update_spinner(app: &mut App) {
    if !app.session.is_typing() {
        return;
    }
    let now = Instant::now();
    if now.duration_since(app.spinner_last) >= Duration::from_millis(SPINNER_INTERVAL_MS) {
        app.spinner_last = now;
        app.spinner_step = app.spinner_step.wrapping_add(1);
    }
}

fn ui(f: &mut Frame<'_>, app: &App) {
    let size = f.area();
    let palette = backdrop_palette(app.session.background_index());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // landing + chat window
            Constraint::Length(1), // status
        ])
        .split(size);

    render_header(f, app, layout[0]);
    f.render_widget(render_landing(app, palette), layout[1]);

    if app.session.is_open() {
        let window = chat_window_rect(layout[1]);
        f.render_widget(Clear, window);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(window);

        f.render_widget(render_chat(app, parts[0], palette), parts[0]);
        f.render_widget(render_input(app, palette), parts[1]);

        if app.mode == Mode::Widget {
            let draft_w = app.session.draft().width() as u16;
            let x = parts[1]
                .x
                .saturating_add(1)
                .saturating_add(input_prompt_prefix().width() as u16)
                .saturating_add(draft_w);
            let y = parts[1].y.saturating_add(1);
            f.set_cursor_position((x.min(parts[1].x + parts[1].width.saturating_sub(2)), y));
        }
    }

    f.render_widget(render_status(app), layout[2]);

    if app.mode == Mode::Help {
        let area = centered_rect(60, 50, size);
        f.render_widget(Clear, area);
        f.render_widget(render_help(app), area);
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    sky: Color,
    accent: Color,
}

/// One palette per backdrop slot so the rotation is visible in a terminal.
fn backdrop_palette(index: usize) -> Palette {
    const PALETTES: &[Palette] = &[
        Palette {
            sky: Color::Rgb(18, 24, 48),
            accent: Color::Rgb(232, 117, 0),
        },
        Palette {
            sky: Color::Rgb(12, 52, 40),
            accent: Color::Rgb(255, 205, 86),
        },
        Palette {
            sky: Color::Rgb(44, 18, 56),
            accent: Color::Rgb(0, 200, 220),
        },
    ];
    PALETTES[index % PALETTES.len()]
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let base = Style::default().fg(Color::Black).bg(Color::White);
    let left = Paragraph::new(Line::from(vec![
        Span::styled(" ★ COSMO ", base.add_modifier(Modifier::BOLD)),
        Span::raw("UTD assistant"),
    ]))
    .style(base);

    let backdrop = asset_url(&app.asset_base, app.session.current_background());
    let right_text = format!(" backdrop={backdrop}  api={} ", app.api_url);
    let right = Paragraph::new(truncate_to_width(&right_text, cols[1].width as usize))
        .style(base)
        .alignment(Alignment::Right);

    f.render_widget(left, cols[0]);
    f.render_widget(right, cols[1]);
}

fn render_landing(app: &App, palette: Palette) -> Paragraph<'static> {
    let accent = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    let mut lines = vec![Line::from(""); 2];
    for row in LOGO {
        lines.push(Line::from(Span::styled(row.to_string(), accent)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "your one stop solution for all things UTD",
        muted,
    )));
    lines.push(Line::from(Span::styled(
        asset_url(&app.asset_base, &app.logo),
        muted.add_modifier(Modifier::DIM),
    )));
    lines.push(Line::from(""));
    let bubble = if app.session.is_open() {
        "💬 Tab to close chat"
    } else {
        "💬 Tab to chat"
    };
    lines.push(Line::from(Span::styled(bubble, accent)));

    Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .style(Style::default().bg(palette.sky).fg(Color::White))
}

const LOGO: &[&str] = &[
    " ██████  ██████  ███████ ███    ███  ██████ ",
    "██      ██    ██ ██      ████  ████ ██    ██",
    "██      ██    ██ ███████ ██ ████ ██ ██    ██",
    "██      ██    ██      ██ ██  ██  ██ ██    ██",
    " ██████  ██████  ███████ ██      ██  ██████ ",
];

/// Docked bottom-right like the web widget's chat window.
fn chat_window_rect(area: Rect) -> Rect {
    let width = (area.width * 3 / 5).max(30).min(area.width);
    let height = (area.height * 4 / 5).max(8).min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

fn render_chat(app: &App, area: Rect, palette: Palette) -> Paragraph<'static> {
    let width = area.width.saturating_sub(2).max(1) as usize;
    let height = area.height.saturating_sub(2).max(1) as usize;

    let all_lines = build_chat_lines(
        app.session.messages(),
        width,
        app.session.is_typing(),
        app.spinner_step,
        palette,
    );
    let total = all_lines.len();
    let max_scroll = total.saturating_sub(height);
    let scroll = app.scroll_from_bottom.min(max_scroll);
    let top = max_scroll.saturating_sub(scroll);
    let end = (top + height).min(total);

    let visible = &all_lines[top..end];

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .title(" COSMO ");
    block = block.title(
        Title::from(Line::from(Span::styled(
            " PgUp/PgDn scroll · Ctrl+O open link ",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right)
        .position(Position::Bottom),
    );

    Paragraph::new(Text::from(visible.to_vec()))
        .block(block)
        .style(Style::default().bg(Color::Rgb(30, 30, 40)).fg(Color::White))
        .wrap(Wrap { trim: false })
}

fn render_input(app: &App, palette: Palette) -> Paragraph<'static> {
    let prefix = Span::styled(
        input_prompt_prefix(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    );
    let body = if app.session.draft().is_empty() {
        Span::styled(
            DRAFT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::raw(app.session.draft().to_string())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .title(
            Title::from(" Enter ⏎ Send ")
                .alignment(Alignment::Right)
                .position(Position::Top),
        );

    Paragraph::new(Line::from(vec![prefix, body])).block(block)
}

fn render_status(app: &App) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.status),
        Style::default().fg(Color::White),
    )];
    if let Some(ms) = app.last_elapsed_ms {
        spans.push(Span::styled(
            format!(" last reply {ms} ms "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.session.outstanding() > 1 {
        spans.push(Span::styled(
            format!(" {} requests in flight ", app.session.outstanding()),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        " F1 help · Esc quit ",
        Style::default().fg(Color::DarkGray),
    ));
    Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black))
}

fn render_help(app: &App) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Tab / F2     open or close the chat"),
        Line::from("Enter        send the question"),
        Line::from("Backspace    delete a character"),
        Line::from("Ctrl+U       clear the draft"),
        Line::from("PgUp / PgDn  scroll the conversation"),
        Line::from("End          jump to the newest message"),
        Line::from("Ctrl+O       open the newest link in a browser"),
        Line::from("Esc          quit"),
        Line::from(""),
        Line::from(format!("logo    {}", asset_url(&app.asset_base, &app.logo))),
        Line::from(format!("avatar  {}", asset_url(&app.asset_base, &app.avatar))),
        Line::from(""),
        Line::from("Press any key to close."),
    ];
    Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Help "),
        )
        .wrap(Wrap { trim: false })
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    let vertical = popup_layout[1];
    let popup_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical);

    popup_layout[1]
}

fn input_prompt_prefix() -> &'static str {
    "♡ "
}

fn message_prefix(kind: MessageKind, palette: Palette) -> Span<'static> {
    match kind {
        MessageKind::User => Span::styled(
            "You  ",
            Style::default().fg(Color::Rgb(22, 163, 74)).add_modifier(Modifier::BOLD),
        ),
        MessageKind::Bot => Span::styled(
            "Temoc ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
    }
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Rgb(0, 255, 255))
        .add_modifier(Modifier::UNDERLINED)
}

fn typing_text(step: u64) -> String {
    let base = TYPING_TEXT.trim_end_matches('.');
    let dots = (step % 3 + 1) as usize;
    format!("{base}{}", ".".repeat(dots))
}

fn build_chat_lines(
    messages: &[Message],
    width: usize,
    typing: bool,
    spinner_step: u64,
    palette: Palette,
) -> Vec<Line<'static>> {
    let mut out = Vec::new();

    for msg in messages {
        let prefix = message_prefix(msg.kind(), palette);
        push_prefixed(&mut out, prefix, message_rows(msg.text()), width);
        // spacer line between messages
        out.push(Line::from(""));
    }

    if typing {
        let prefix = message_prefix(MessageKind::Bot, palette);
        let row = vec![Run {
            text: typing_text(spinner_step),
            style: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        }];
        push_prefixed(&mut out, prefix, vec![row], width);
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
struct Run {
    text: String,
    style: Style,
}

/// Formatter segments grouped into display rows; a row ends at each break.
fn message_rows(text: &str) -> Vec<Vec<Run>> {
    let mut rows = vec![Vec::new()];
    for segment in segments(text) {
        match segment {
            Segment::Text(text) => {
                if let Some(row) = rows.last_mut() {
                    row.push(Run {
                        text,
                        style: Style::default(),
                    });
                }
            }
            Segment::Link { label, href } => {
                let text = if label == href {
                    href
                } else {
                    format!("{} ({href})", label.replace('\n', " "))
                };
                if let Some(row) = rows.last_mut() {
                    row.push(Run {
                        text,
                        style: link_style(),
                    });
                }
            }
            Segment::LineBreak => rows.push(Vec::new()),
        }
    }
    rows
}

fn push_prefixed(out: &mut Vec<Line<'static>>, prefix: Span<'static>, rows: Vec<Vec<Run>>, width: usize) {
    let prefix_len = prefix.content.as_ref().width();
    let indent = " ".repeat(prefix_len);
    let avail = width.saturating_sub(prefix_len).max(1);

    let mut first = true;
    for row in rows {
        for wrapped in wrap_runs(&row, avail) {
            let lead = if first {
                first = false;
                prefix.clone()
            } else {
                Span::raw(indent.clone())
            };
            let mut spans = vec![lead];
            spans.extend(wrapped);
            out.push(Line::from(spans));
        }
    }
    if first {
        out.push(Line::from(prefix));
    }
}

/// Greedy word wrap across styled runs; whitespace collapses to single spaces.
fn wrap_runs(runs: &[Run], width: usize) -> Vec<Vec<Span<'static>>> {
    let mut lines: Vec<Vec<Span<'static>>> = Vec::new();
    let mut cur: Vec<Span<'static>> = Vec::new();
    let mut cur_w = 0usize;

    for run in runs {
        // A run glued to its neighbour (no leading space) continues the word.
        let leading_space = run.text.starts_with(char::is_whitespace);
        for (idx, word) in run.text.split_whitespace().enumerate() {
            let word_w = word.width();
            let needs_space = cur_w > 0 && (idx > 0 || leading_space);
            let extra = usize::from(needs_space);
            if cur_w > 0 && cur_w + extra + word_w > width {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0;
            } else if needs_space {
                cur.push(Span::raw(" "));
                cur_w += 1;
            }
            for piece in split_to_width(word, width) {
                if cur_w > 0 && cur_w + piece.width() > width {
                    lines.push(std::mem::take(&mut cur));
                    cur_w = 0;
                }
                cur_w += piece.width();
                cur.push(Span::styled(piece, run.style));
            }
        }
        if run.text.ends_with(char::is_whitespace) && cur_w > 0 && cur_w < width {
            cur.push(Span::raw(" "));
            cur_w += 1;
        }
    }

    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

/// Breaks a single overlong word (long URLs) into width-sized pieces.
fn split_to_width(word: &str, width: usize) -> Vec<String> {
    if word.width() <= width || width == 0 {
        return vec![word.to_string()];
    }
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut w = 0usize;
    for ch in word.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw > width && !cur.is_empty() {
            out.push(std::mem::take(&mut cur));
            w = 0;
        }
        cur.push(ch);
        w += cw;
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

fn truncate_to_width(input: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if input.width() <= max_width {
        return input.to_string();
    }

    const ELLIPSIS: &str = "…";
    let ell_w = ELLIPSIS.width();
    if max_width <= ell_w {
        return ELLIPSIS.to_string();
    }

    let mut out = String::new();
    let mut w = 0usize;
    for ch in input.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w + cw + ell_w > max_width {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wrap_keeps_words_and_styles() {
        let runs = vec![
            Run {
                text: "see the ".to_string(),
                style: Style::default(),
            },
            Run {
                text: "catalog".to_string(),
                style: link_style(),
            },
            Run {
                text: " today".to_string(),
                style: Style::default(),
            },
        ];
        let lines = wrap_runs(&runs, 11);
        let texts: Vec<String> = lines
            .iter()
            .map(|spans| spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(texts, vec!["see the ", "catalog", "today"]);
        assert!(
            lines[1]
                .iter()
                .any(|s| s.content == "catalog" && s.style == link_style())
        );
    }

    #[test]
    fn wrap_glues_punctuation_to_link() {
        let runs = vec![
            Run {
                text: "https://a.edu".to_string(),
                style: link_style(),
            },
            Run {
                text: ".".to_string(),
                style: Style::default(),
            },
        ];
        let lines = wrap_runs(&runs, 40);
        let text: String = lines[0].iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "https://a.edu.");
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(split_to_width("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(split_to_width("ab", 3), vec!["ab"]);
    }

    #[test]
    fn chat_lines_render_links_breaks_and_typing() {
        let messages = vec![
            Message::user("hi"),
            Message::bot("Visit [UTD](https://utdallas.edu)\nbye"),
        ];
        let lines = build_chat_lines(&messages, 60, true, 0, backdrop_palette(0));
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts[0], "You  hi");
        assert_eq!(texts[1], "");
        assert_eq!(texts[2], "Temoc Visit UTD (https://utdallas.edu)");
        assert_eq!(texts[3], "      bye");
        assert_eq!(texts[4], "");
        assert_eq!(texts[5], "Temoc COSMO is searching the UTD cosmos.");
    }

    #[test]
    fn empty_bot_reply_still_gets_a_row() {
        let lines = build_chat_lines(&[Message::bot("")], 40, false, 0, backdrop_palette(1));
        assert_eq!(line_text(&lines[0]), "Temoc ");
    }

    #[test]
    fn typing_dots_cycle() {
        assert!(typing_text(0).ends_with("cosmos."));
        assert!(typing_text(1).ends_with("cosmos.."));
        assert!(typing_text(2).ends_with("cosmos..."));
        assert!(typing_text(3).ends_with("cosmos."));
    }

    #[test]
    fn palettes_cycle_with_backdrop() {
        assert_eq!(backdrop_palette(0).sky, backdrop_palette(3).sky);
        assert_ne!(backdrop_palette(0).sky, backdrop_palette(1).sky);
    }

    #[test]
    fn chat_window_fits_inside_area() {
        let area = Rect::new(0, 1, 100, 40);
        let win = chat_window_rect(area);
        assert_eq!(win.width, 60);
        assert_eq!(win.height, 32);
        assert_eq!(win.x + win.width, 100);
        assert_eq!(win.y + win.height, 41);

        let tiny = chat_window_rect(Rect::new(0, 0, 20, 5));
        assert!(tiny.width <= 20 && tiny.height <= 5);
    }

    #[test]
    fn draws_open_widget_without_panicking() {
        let mut session = Session::default();
        session.toggle_panel();
        session.set_draft("where is ECSW?");
        let app = App::new(session, "http://localhost:8000".to_string(), "/".to_string());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("How may I help you today?"));
        assert!(screen.contains("where is ECSW?"));
        assert!(screen.contains("backdrop=/bg1.jpg"));
    }

    #[test]
    fn closed_widget_shows_placeholder_hint_only() {
        let app = App::new(
            Session::default(),
            "http://localhost:8000".to_string(),
            "/".to_string(),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Tab to chat"));
        assert!(!screen.contains(DRAFT_PLACEHOLDER));
    }
}
