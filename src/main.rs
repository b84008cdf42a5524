//! GIF Portal - actor-based terminal client for an on-chain GIF board
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - session state machine processing events
//! - Remote Layer (Tokio) - async wallet and RPC calls

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use gif_portal::constants::{twitter_link, APP_NAME, APP_VERSION, LOG_FILE_NAME, TWITTER_HANDLE};
use gif_portal::messages::ui_events::{key_to_ui_event, InputMode};
use gif_portal::models::abbreviate_address;
use gif_portal::remote::TrustStore;
use gif_portal::ui::{
    activity_color, activity_marker, centered_rect, gallery_placeholder, input_cursor_x, panel,
};
use gif_portal::{
    AppActor, Cli, KeypairWallet, PortalConfig, RemoteActor, RemoteCommand, RemoteResponse,
    RenderState, RpcLedger, UiEvent, View,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Resolve before touching the terminal so errors print normally
    let config = PortalConfig::resolve(&cli)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (remote_cmd_tx, remote_cmd_rx) = mpsc::unbounded_channel::<RemoteCommand>();
    let (remote_resp_tx, remote_resp_rx) = mpsc::unbounded_channel::<RemoteResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn remote actor
    let wallet = KeypairWallet::new(
        config.wallet_keypair.clone(),
        TrustStore::new(config.trust_file.clone()),
    );
    let ledger = RpcLedger::new(&config);
    let remote_actor = RemoteActor::new(wallet, ledger, config, remote_resp_tx);
    tokio::spawn(remote_actor.run(remote_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(remote_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, remote_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.view,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(6),    // View panel
            Constraint::Length(8), // Activity log
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);

    match state.view {
        View::Unconnected => draw_unconnected(f, state, main_chunks[1]),
        View::Setup => draw_setup(f, state, main_chunks[1]),
        View::Gallery => draw_gallery(f, state, main_chunks[1]),
    }

    draw_activity(f, state, main_chunks[2]);
    draw_footer(f, main_chunks[3]);
    draw_status_bar(f, state, main_chunks[4]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let session = match &state.address {
        Some(address) => Span::styled(format!("[+] {}", address), Style::default().fg(Color::Green)),
        None if state.is_connecting => {
            Span::styled("[~] connecting", Style::default().fg(Color::Yellow))
        }
        None => Span::styled("[-] no wallet", Style::default().fg(Color::DarkGray)),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Magenta).bold()),
            Span::raw("  "),
            session,
        ]),
        Line::from(Span::styled(
            " View your GIF collection on chain",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_unconnected(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = vec![Line::raw("")];

    if state.is_connecting {
        lines.push(Line::from(Span::styled(
            "  Connecting to wallet...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("c", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to connect your wallet"),
        ]));
    }

    if state.wallet_missing {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  No wallet keypair found. Create one with `solana-keygen new` or pass --wallet.",
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(" Wallet ", false))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_setup(f: &mut Frame, state: &RenderState, area: Rect) {
    let action = if state.is_writing {
        Line::from(Span::styled(
            "  Initializing...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("i", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to do one-time initialization of the GIF program account"),
        ])
    };

    let lines = vec![
        Line::raw(""),
        Line::raw("  The GIF program account does not exist yet."),
        Line::raw(""),
        action,
    ];

    let paragraph = Paragraph::new(lines)
        .block(panel(" Setup ", true))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_gallery(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Link input
            Constraint::Min(3),    // GIF list
        ])
        .split(area);

    let is_editing = state.input_mode == InputMode::Editing;
    let input_title = if state.is_writing {
        " Enter gif link! [sending...] "
    } else {
        " Enter gif link! (e:edit Enter:submit) "
    };
    let input = Paragraph::new(state.input.as_str()).block(panel(input_title, is_editing));
    f.render_widget(input, chunks[0]);

    if is_editing {
        let cursor_x = input_cursor_x(chunks[0], state.cursor_position);
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }

    let mut lines: Vec<Line> = state
        .gifs
        .iter()
        .enumerate()
        .map(|(i, gif)| {
            Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(gif.gif_link.clone(), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("  by {}", abbreviate_address(&gif.user_address)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    if lines.is_empty() {
        let hint = gallery_placeholder(state);
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    }

    let title = format!(" GIFs ({}) (↑/↓ scroll, r:refresh) ", state.gifs.len());
    let list = Paragraph::new(lines)
        .block(panel(title, false))
        .scroll((state.gallery_scroll, 0));
    f.render_widget(list, chunks[1]);
}

fn draw_activity(f: &mut Frame, state: &RenderState, area: Rect) {
    let lines: Vec<Line> = state
        .activity
        .iter()
        .map(|entry| {
            let style = Style::default().fg(activity_color(entry.level));
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{} {}", activity_marker(entry.level), entry.message), style),
            ])
        })
        .collect();

    let log = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Activity "),
    );
    f.render_widget(log, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(format!(" built on @{} ", TWITTER_HANDLE), Style::default().fg(Color::Magenta)),
        Span::styled(twitter_link(), Style::default().fg(Color::DarkGray).underlined()),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_busy() {
        " Working... | q:quit "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:submit "
    } else {
        match state.view {
            View::Unconnected => " c:connect | ?:help | q:quit ",
            View::Setup => " i:initialize | r:refresh | ?:help | q:quit ",
            View::Gallery => " e:edit | s:submit | r:refresh | ?:help | q:quit ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} v{} - Keyboard Shortcuts

 WALLET
   c / Enter          Connect wallet

 SETUP
   i / Enter          Initialize the GIF program account

 GALLERY
   e                  Edit gif link
   s / Enter          Submit gif link
   ↑ / ↓              Scroll the list
   r                  Refresh the list

 EDITING
   Esc                Stop editing
   ← / →              Move cursor
   Enter              Submit

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME, APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
