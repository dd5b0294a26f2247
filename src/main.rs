//! apiboard - Actor-based apidoc browser and request composer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use apiboard_tui::app::{AppActor, AppState};
use apiboard_tui::catalog::{load_catalog, EndpointDescriptor};
use apiboard_tui::config::{Cli, Config, Settings};
use apiboard_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE};
use apiboard_tui::messages::ui_events::{key_to_ui_event, EditTarget, InputMode, OutputTab, Panel};
use apiboard_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use apiboard_tui::network::NetworkActor;
use apiboard_tui::ui::{self, highlight_json, kind_color, method_color, panel_block, status_color};

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
    let config = Config::discover(&cli)?;
    let settings = Settings::resolve(&cli, &config)?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(&settings.log_dir, LOG_FILE);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);

    let catalog = load_catalog(&settings.catalog_dir)
        .with_context(|| format!("loading catalog from {}", settings.catalog_dir.display()))?;
    let host = settings.host(catalog.project().url.as_deref());
    let catalog = Arc::new(catalog);

    // Deep link if given and known, else the first listed endpoint
    let mut state = AppState::new(Arc::clone(&catalog), host);
    let requested = settings.endpoint.as_ref().and_then(|(group, name)| {
        let found = catalog.find(group, name);
        if found.is_none() {
            tracing::warn!(%group, %name, "Requested endpoint not in catalog");
        }
        found
    });
    if let Some(index) = requested.or_else(|| state.listing.first().copied()) {
        state.activate_endpoint(index);
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
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
        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.show_readme,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
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
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main_chunks[1]);

    draw_endpoints(f, state, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Docs
            Constraint::Percentage(25), // Composer
            Constraint::Min(5),         // Output
        ])
        .split(columns[1]);

    draw_docs(f, state, right[0]);
    draw_composer(f, state, right[1]);
    draw_output(f, state, right[2]);

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }
    if state.show_readme {
        draw_readme_popup(f, state, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let project = state.catalog.project();
    let mut spans = vec![Span::styled(
        format!(" {} ", project.display_title()),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    )];
    if let Some(version) = &project.version {
        spans.push(Span::styled(format!(" v{}", version), Style::default().fg(Color::Gray)));
    }
    spans.push(Span::styled(
        format!("  {} endpoints", state.catalog.endpoints().len()),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn is_editing(state: &RenderState, target: EditTarget) -> bool {
    state.input_mode == InputMode::Editing && state.edit_target == Some(target)
}

/// Column of the cursor within `text`, counted in characters
fn cursor_column(text: &str, cursor_position: usize) -> u16 {
    let end = cursor_position.min(text.len());
    text.get(..end).map(|t| t.chars().count()).unwrap_or(0) as u16
}

fn place_cursor(f: &mut Frame, area: Rect, x_offset: u16, row: u16) {
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + 1 + x_offset).min(max_x);
    let max_y = area.y + area.height.saturating_sub(2);
    let cursor_y = (area.y + 1 + row).min(max_y);
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_endpoints(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Search box
    let searching = is_editing(state, EditTarget::Search);
    let search_block = panel_block(String::from(" Search (/) "), searching, searching);
    let search_text = if state.search.is_empty() && !searching {
        Span::styled("type / to filter", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.search.as_str())
    };
    f.render_widget(Paragraph::new(search_text).block(search_block), chunks[0]);
    if searching {
        place_cursor(f, chunks[0], cursor_column(&state.search, state.cursor_position), 0);
    }

    // Grouped list; group headings are not selectable
    let is_focused = state.active_panel == Panel::Endpoints;
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = None;
    let mut position = 0;

    for (group, members) in state.catalog.grouped(&state.search) {
        items.push(ListItem::new(Line::from(Span::styled(
            group.to_string(),
            Style::default().fg(Color::Gray).bold(),
        ))));
        for index in members {
            let Some(endpoint) = state.catalog.get(index) else {
                continue;
            };
            if position == state.selected_endpoint {
                selected_item = Some(items.len());
            }
            items.push(endpoint_item(endpoint, state.active_endpoint == Some(index)));
            position += 1;
        }
    }

    let title = format!(" Endpoints ({}) ", state.listing.len());
    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items)
        .block(panel_block(title, is_focused, false))
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(selected_item);
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn endpoint_item(endpoint: &EndpointDescriptor, active: bool) -> ListItem<'static> {
    let method = endpoint.execution_method();
    let method_span = Span::styled(
        format!(" {:7}", method.as_str()),
        Style::default().fg(method_color(method.as_str())).bold(),
    );
    let mut title_style = Style::default();
    if endpoint.deprecated.is_some() {
        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
    }
    if active {
        title_style = title_style.fg(Color::Cyan);
    }
    ListItem::new(Line::from(vec![
        method_span,
        Span::styled(endpoint.display_title(), title_style),
    ]))
}

fn draw_docs(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(endpoint) = state.endpoint() else {
        let hint = Paragraph::new("Select an endpoint with Enter to see its documentation.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(String::from(" Docs "), false, false));
        f.render_widget(hint, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    let mut heading = vec![Span::styled(
        format!("{} - {}", endpoint.group, endpoint.display_title()),
        Style::default().bold(),
    )];
    if let Some(version) = &endpoint.version {
        heading.push(Span::styled(format!("  v{}", version), Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(heading));

    if let Some(deprecated) = &endpoint.deprecated {
        let note = deprecated
            .content
            .as_deref()
            .map(apiboard_tui::catalog::strip_html)
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("DEPRECATED {}", note).trim_end().to_string(),
            Style::default().fg(Color::Red).bold(),
        )));
    }

    let mut request_line: Vec<Span> = endpoint
        .methods()
        .into_iter()
        .map(|m| {
            let color = method_color(&m);
            Span::styled(format!(" {} ", m), Style::default().fg(Color::Black).bg(color))
        })
        .collect();
    request_line.push(Span::raw(format!(" {}", endpoint.url)));
    lines.push(Line::from(request_line));

    if let Some(description) = endpoint.plain_description() {
        lines.push(Line::raw(""));
        lines.extend(description.lines().map(|l| Line::raw(l.to_string())));
    }

    for table in endpoint.field_tables() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(table.title, Style::default().fg(Color::Cyan).bold())));
        for row in table.rows {
            let mut spans = vec![
                Span::styled(format!("  {:20}", row.display_name()), Style::default().bold()),
                Span::styled(format!(" {:10}", row.field_type), Style::default().fg(Color::Yellow)),
            ];
            if let Some(size) = &row.size {
                spans.push(Span::styled(format!(" {{{}}}", size), Style::default().fg(Color::DarkGray)));
            }
            if row.optional {
                spans.push(Span::styled(" optional ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::raw(format!(" {}", row.plain_description())));
            if let Some(default) = &row.default_value {
                spans.push(Span::styled(
                    format!(" (default {})", default),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let allowed = row.allowed_values_display();
            if !allowed.is_empty() {
                spans.push(Span::styled(
                    format!(" [{}]", allowed.join(", ")),
                    Style::default().fg(Color::Green),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    for example in endpoint.success_examples() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            example.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )));
        lines.extend(highlight_json(&example.content));
    }

    let docs = Paragraph::new(lines)
        .block(panel_block(format!(" {} ", endpoint.group), false, false))
        .wrap(Wrap { trim: false });
    f.render_widget(docs, area);
}

fn draw_composer(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Composer;
    let editing = is_focused && state.input_mode == InputMode::Editing;

    let title = match state.endpoint() {
        Some(endpoint) => format!(
            " Composer: {} {} ",
            endpoint.execution_method(),
            endpoint.url
        ),
        None => String::from(" Composer "),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Host   ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.host.clone()),
    ])];

    for (i, field) in state.fields.iter().enumerate() {
        let selected = is_focused && i == state.selected_field;
        let marker = if selected { "> " } else { "  " };
        let name_style = if selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:7}", field.kind.as_str()), Style::default().fg(kind_color(field.kind))),
            Span::styled(field.name.clone(), name_style),
            Span::styled(" = ", Style::default().fg(Color::DarkGray)),
            Span::raw(field.value.clone()),
        ]));
    }

    if state.fields.is_empty() && state.endpoint().is_some() {
        lines.push(Line::from(Span::styled(
            "  No fields. H/Q/B adds a header/query/body field.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the selected row visible
    let visible_rows = area.height.saturating_sub(2) as usize;
    let selected_row = state.selected_field + 1;
    let scroll = selected_row.saturating_sub(visible_rows.saturating_sub(1)) as u16;

    let composer = Paragraph::new(lines)
        .block(panel_block(title, is_focused, editing))
        .scroll((scroll, 0));
    f.render_widget(composer, area);

    match state.edit_target {
        Some(EditTarget::Host) if editing => {
            let column = 7 + cursor_column(&state.host, state.cursor_position);
            place_cursor(f, area, column, 0);
        }
        Some(EditTarget::FieldName(id)) | Some(EditTarget::FieldValue(id)) if editing => {
            let Some((row, field)) = state.fields.iter().enumerate().find(|(_, field)| field.id == id) else {
                return;
            };
            let prefix = 2 + 7;
            let column = match state.edit_target {
                Some(EditTarget::FieldName(_)) => prefix + cursor_column(&field.name, state.cursor_position),
                _ => {
                    prefix
                        + field.name.chars().count() as u16
                        + 3
                        + cursor_column(&field.value, state.cursor_position)
                }
            };
            let row = (row as u16 + 1).saturating_sub(scroll);
            place_cursor(f, area, column, row);
        }
        _ => {}
    }
}

fn draw_output(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Output;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let titles: Vec<&str> = OutputTab::ALL.iter().map(|t| t.title()).collect();
    f.render_widget(ui::render_tabs(&titles, state.output_tab.index()), chunks[0]);

    let mut block = panel_block(String::new(), is_focused, false);

    let lines = match state.output_tab {
        OutputTab::Response => {
            let status_text = match state.response.status_code {
                Some(code) => Span::styled(
                    format!(" {} ", code),
                    Style::default().fg(status_color(code)).bold(),
                ),
                None if state.is_loading => Span::raw(" Loading... "),
                None => Span::raw(" Response "),
            };
            let time_text = if state.response.time_ms > 0 {
                format!(" {}ms ", state.response.time_ms)
            } else {
                String::new()
            };
            block = block
                .title(status_text)
                .title_bottom(Line::from(time_text).right_aligned());
            highlight_json(&state.response.body)
        }
        OutputTab::Call | OutputTab::Curl => {
            block = block.title(format!(" {} ", state.output_tab.title()));
            let text = state.output_text();
            if text.is_empty() {
                vec![Line::from(Span::styled(
                    "Submit a request to render it here.",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                text.lines().map(|l| Line::raw(l.to_string())).collect()
            }
        }
    };

    let output = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(output, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " Enter/ESC:stop editing | arrows:move cursor | Ctrl+S:submit "
    } else {
        match state.active_panel {
            Panel::Endpoints => " Tab:panel | Enter:open | /:search | s:submit | r:read-me | ?:help | q:quit ",
            Panel::Composer => " Tab:panel | e:value n:name | H/Q/B:add d:del y:dup | h:host | s:submit ",
            Panel::Output => " Tab:panel | ←/→:tab | ↑/↓:scroll | s:submit | ?:help | q:quit ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 APIBOARD - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Move in the focused panel
   /                  Search endpoints
   Enter              Open endpoint (endpoint list)

 COMPOSER
   e / Enter          Edit field value
   n                  Rename field
   H / Q / B          Add header / query / body field
   d                  Remove field
   y                  Duplicate field
   h                  Edit host

 REQUEST
   s / Ctrl+S         Submit request
   ← / →              Switch Response / axios / curl (output)

 GENERAL
   r                  Project read-me
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

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

fn draw_readme_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    let project = state.catalog.project();

    let mut lines = vec![Line::from(Span::styled(
        project.display_title(),
        Style::default().bold(),
    ))];
    if let Some(generated) = project.generated_at() {
        lines.push(Line::from(Span::styled(
            format!("Generated {}", generated.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(url) = &project.url {
        lines.push(Line::from(Span::styled(url.clone(), Style::default().fg(Color::Cyan))));
    }
    lines.push(Line::raw(""));

    let readme = project.readme();
    if readme.is_empty() {
        lines.push(Line::from(Span::styled(
            "This catalog has no read-me.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(readme.lines().map(|l| Line::raw(l.to_string())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Read-me (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
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

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
