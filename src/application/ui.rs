use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::AuthForm;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::MessageType;
use crate::domain::models::Route;
use crate::domain::models::TextArea;
use crate::domain::models::UploadRequest;
use crate::domain::models::UploadResult;
use crate::domain::services::AppState;
use crate::domain::services::EventsService;
use crate::domain::services::Modal;
use crate::domain::services::SessionStore;
use crate::domain::services::UploadPhase;
use crate::infrastructure::api::HttpApi;

fn input_title(route: Route) -> &'static str {
    match route {
        Route::Upload => return "File path",
        Route::Report => return "Report title",
        _ => return "Message",
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1];
}

fn page_block(title: &str) -> Block<'_> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(title)
        .padding(Padding::new(1, 1, 0, 0));
}

fn render_landing<B: Backend>(frame: &mut Frame<'_, B>) {
    let lines = vec![
        Line::from(Span::styled(
            "HomeWorth",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Know what your home is worth."),
        Line::from(""),
        Line::from("l - Log in"),
        Line::from("s - Sign up"),
        Line::from("q - Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(page_block("HomeWorth"))
            .alignment(Alignment::Center),
        centered_rect(60, 50, frame.size()),
    );
}

fn render_home<B: Backend>(frame: &mut Frame<'_, B>, app_state: &AppState) {
    let email = app_state
        .session_store
        .session()
        .map(|session| return session.email.to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(format!("Signed in as {email}")),
        Line::from(""),
        Line::from("c - Chat"),
        Line::from("u - Upload"),
        Line::from("r - Report"),
        Line::from("o - Log out"),
        Line::from("q - Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(page_block("Home"))
            .alignment(Alignment::Center),
        centered_rect(60, 50, frame.size()),
    );
}

fn render_auth<B: Backend>(frame: &mut Frame<'_, B>, form: &AuthForm, title: &str) {
    let mut lines: Vec<Line> = vec![];
    for (idx, field) in form.fields().iter().enumerate() {
        let mut marker = "  ";
        let mut style = Style::default();
        if idx == form.focused() {
            marker = "> ";
            style = Style::default().add_modifier(Modifier::BOLD);
        }

        lines.push(Line::from(Span::styled(
            format!("{marker}{}: {}", field.label, field.display_value()),
            style,
        )));
    }

    lines.push(Line::from(""));
    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("Tab switches fields, Enter submits, Esc goes back."));

    frame.render_widget(
        Paragraph::new(lines).block(page_block(title)),
        centered_rect(60, 50, frame.size()),
    );
}

fn render_related_panel<B: Backend>(
    frame: &mut Frame<'_, B>,
    app_state: &mut AppState,
    rect: Rect,
) {
    if app_state
        .sync_panel_scroll(rect.height.saturating_sub(2))
        .is_err()
    {
        return;
    }

    let mut lines: Vec<Line> = vec![];

    if let Ok(shared) = app_state.shared() {
        if shared.card_count() == 0 {
            lines.push(Line::from("No related content for this query."));
        }

        let mut idx = 0;
        for response in shared.chat_responses() {
            let mut style = Style::default();
            if idx == app_state.panel_selected {
                style = Style::default().add_modifier(Modifier::REVERSED);
            }

            lines.push(Line::from(Span::styled(
                format!("Chat {}: {}", response.chat_id, response.item_label()),
                style,
            )));
            lines.push(Line::from(format!("  {}", response.context_label())));
            lines.push(Line::from(format!("  {}", response.message_label())));
            idx += 1;
        }

        for response in shared.image_responses() {
            let mut style = Style::default();
            if idx == app_state.panel_selected {
                style = Style::default().add_modifier(Modifier::REVERSED);
            }

            let filename = response.filename.clone().unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("Image {}: {filename}", response.image_id),
                style,
            )));
            lines.push(Line::from(format!("  {}", response.items_label())));
            idx += 1;
        }
    }

    let mut title = "Related content";
    if app_state.panel_scroll.has_more_below() {
        title = "Related content (more below)";
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(page_block(title))
            .scroll((app_state.panel_scroll.position, 0)),
        rect,
    );
}

fn render_modal<B: Backend>(frame: &mut Frame<'_, B>, app_state: &AppState) {
    let Some(modal) = &app_state.modal else {
        return;
    };

    let rect = centered_rect(70, 70, frame.size());
    frame.render_widget(Clear, rect);

    match modal {
        Modal::ChatLogPending() => {
            Loading::new("Fetching chatlog...").render(frame, rect);
        }
        Modal::ImagePending() => {
            Loading::new("Fetching image...").render(frame, rect);
        }
        Modal::ChatLog(entries) => {
            let lines = entries
                .iter()
                .map(|entry| {
                    return Line::from(format!("{}: {}", entry.sender, entry.text));
                })
                .collect::<Vec<Line>>();

            frame.render_widget(
                Paragraph::new(lines)
                    .block(page_block("Chat log"))
                    .wrap(ratatui::widgets::Wrap { trim: false }),
                rect,
            );
        }
        Modal::Image(preview) => {
            let lines = vec![
                Line::from(format!("Image saved to {}", preview.path().display())),
                Line::from(format!("{} bytes", preview.byte_len())),
                Line::from(""),
                Line::from("Open it with your image viewer. Esc closes and removes the file."),
            ];

            frame.render_widget(Paragraph::new(lines).block(page_block("Image")), rect);
        }
        Modal::Text(text) => {
            frame.render_widget(
                Paragraph::new(text.to_string()).block(page_block("Related content")),
                rect,
            );
        }
    }
}

fn render_chat<B: Backend>(
    frame: &mut Frame<'_, B>,
    app_state: &mut AppState,
    input: &tui_textarea::TextArea<'_>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Max(1),
            Constraint::Max(4),
        ])
        .split(frame.size());

    let panel_open = app_state
        .shared()
        .map(|shared| return shared.detail_panel_open())
        .unwrap_or(false);

    let mut transcript_rect = layout[0];
    if panel_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(layout[0]);
        transcript_rect = columns[0];
        render_related_panel(frame, app_state, columns[1]);
    }

    if transcript_rect.width != app_state.last_known_width
        || transcript_rect.height != app_state.last_known_height
    {
        app_state.set_rect(transcript_rect);
    }

    let width = usize::from(transcript_rect.width.max(3)) - 2;
    let mut lines: Vec<Line> = vec![];
    for message in &app_state.messages {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if message.message_type() == MessageType::Error {
            style = style.fg(Color::Red);
        }

        lines.push(Line::from(Span::styled(
            format!("{}:", message.author.to_string()),
            style,
        )));
        for line in message.as_string_lines(width) {
            lines.push(Line::from(line));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).scroll((app_state.scroll.position, 0)),
        transcript_rect,
    );
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        transcript_rect.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app_state.scroll.scrollbar_state,
    );

    let toggle_label = |enabled: bool| {
        if enabled {
            return "on";
        }
        return "off";
    };
    frame.render_widget(
        Paragraph::new(format!(
            "Search chats: {} (Ctrl+T)   Search images: {} (Ctrl+Y)",
            toggle_label(app_state.search_chat),
            toggle_label(app_state.search_image)
        ))
        .style(Style::default().add_modifier(Modifier::DIM)),
        layout[1],
    );

    if app_state.chat_request.is_pending() {
        Loading::new("Waiting for a response...").render(frame, layout[2]);
    } else {
        frame.render_widget(input.widget(), layout[2]);
    }

    render_modal(frame, app_state);
}

fn upload_result_lines(result: &UploadResult) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = vec![];
    match result {
        UploadResult::ChatLog(insights) => {
            lines.push(Line::from(format!("Items: {}", insights.items.join(", "))));
            lines.push(Line::from(format!(
                "Context: {}",
                insights.context.join(", ")
            )));
            lines.push(Line::from(format!(
                "Messages: {}",
                insights.messages.join(", ")
            )));
        }
        UploadResult::Image(detections) => {
            for detection in &detections.detections {
                lines.push(Line::from(format!(
                    "{} (image {}): {}",
                    detection.metadata.filename,
                    detection.metadata.image_id,
                    detection.metadata.items.join(", ")
                )));
            }
        }
    }

    return lines;
}

fn render_upload<B: Backend>(
    frame: &mut Frame<'_, B>,
    app_state: &AppState,
    input: &tui_textarea::TextArea<'_>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
        .split(frame.size());

    let upload = &app_state.upload;
    let mut lines = vec![
        Line::from(format!(
            "Uploading a {} ({})",
            upload.kind().label(),
            upload.kind().accepted_extensions().join("/")
        )),
        Line::from("Tab switches the upload mode, Enter uploads, Esc goes back."),
        Line::from(""),
    ];

    if let Some(file) = upload.file() {
        lines.push(Line::from(format!("Selected: {}", file.display())));
    }
    if let Some(status) = upload.status() {
        let mut style = Style::default();
        if upload.result().is_none() {
            style = Style::default().fg(Color::Red);
        }
        lines.push(Line::from(Span::styled(status.to_string(), style)));
    }
    if let Some(result) = upload.result() {
        lines.push(Line::from(""));
        lines.extend(upload_result_lines(result));
    }

    frame.render_widget(Paragraph::new(lines).block(page_block("Upload")), layout[0]);

    if upload.phase() == UploadPhase::Uploading {
        Loading::new("Uploading file...").render(frame, layout[1]);
    } else {
        frame.render_widget(input.widget(), layout[1]);
    }
}

fn render_report<B: Backend>(
    frame: &mut Frame<'_, B>,
    app_state: &AppState,
    input: &tui_textarea::TextArea<'_>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
        .split(frame.size());

    let mut lines = vec![
        Line::from("Generate a PDF report of your uploaded inventory."),
        Line::from("Enter generates the report, Esc goes back."),
        Line::from(""),
    ];
    if let Some(status) = &app_state.report_status {
        lines.push(Line::from(status.to_string()));
    }

    frame.render_widget(Paragraph::new(lines).block(page_block("Report")), layout[0]);

    if app_state.report_pending {
        Loading::new("Generating report...").render(frame, layout[1]);
    } else {
        frame.render_widget(input.widget(), layout[1]);
    }
}

fn submit_auth(app_state: &mut AppState, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
    let signup = app_state.route == Route::SignUp;
    let form = match signup {
        true => &mut app_state.signup_form,
        false => &mut app_state.login_form,
    };

    let credentials = form.credentials();
    if credentials.email.is_empty() || credentials.password.is_empty() {
        form.set_error("Please fill in all fields.");
        return Ok(());
    }
    if let Some(confirm) = &credentials.password_confirm {
        if *confirm != credentials.password {
            form.set_error("Passwords do not match.");
            return Ok(());
        }
    }

    if signup {
        tx.send(Action::Register(credentials))?;
    } else {
        tx.send(Action::Login(credentials))?;
    }

    return Ok(());
}

/// Routes one keyboard event to the active page. Returns true when the app
/// should quit.
fn handle_route_input(
    app_state: &mut AppState,
    input: &mut tui_textarea::TextArea<'_>,
    event: Event,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<bool> {
    match app_state.route {
        Route::Landing => match event {
            Event::KeyboardCharInput(i) => match i.key {
                Key::Char('l') => app_state.navigate(Route::Login, tx)?,
                Key::Char('s') => app_state.navigate(Route::SignUp, tx)?,
                Key::Char('q') => return Ok(true),
                _ => (),
            },
            Event::KeyboardEnter() => app_state.navigate(Route::Login, tx)?,
            _ => (),
        },
        Route::Login | Route::SignUp => match event {
            Event::KeyboardCharInput(i) => {
                let form = match app_state.route {
                    Route::SignUp => &mut app_state.signup_form,
                    _ => &mut app_state.login_form,
                };
                match i.key {
                    Key::Char(c) => form.input_char(c),
                    Key::Backspace => form.backspace(),
                    _ => (),
                }
            }
            Event::KeyboardTab() => {
                let form = match app_state.route {
                    Route::SignUp => &mut app_state.signup_form,
                    _ => &mut app_state.login_form,
                };
                form.focus_next();
            }
            Event::KeyboardEnter() => submit_auth(app_state, tx)?,
            Event::KeyboardEsc() => app_state.navigate(Route::Landing, tx)?,
            _ => (),
        },
        Route::Home => match event {
            Event::KeyboardCharInput(i) => match i.key {
                Key::Char('c') => app_state.navigate(Route::Chat, tx)?,
                Key::Char('u') => app_state.navigate(Route::Upload, tx)?,
                Key::Char('r') => app_state.navigate(Route::Report, tx)?,
                Key::Char('o') => tx.send(Action::Logout())?,
                Key::Char('q') => return Ok(true),
                _ => (),
            },
            _ => (),
        },
        Route::Chat => match event {
            Event::KeyboardCharInput(i) => match (i.key, i.ctrl) {
                (Key::Char('t'), true) => app_state.search_chat = !app_state.search_chat,
                (Key::Char('y'), true) => app_state.search_image = !app_state.search_image,
                _ => {
                    if app_state.modal.is_none() && !app_state.chat_request.is_pending() {
                        input.input(i);
                    }
                }
            },
            Event::KeyboardPaste(text) => {
                for c in text.replace('\r', "\n").chars() {
                    match c {
                        '\n' => input.insert_newline(),
                        _ => input.insert_char(c),
                    };
                }
            }
            Event::KeyboardEnter() => {
                if app_state.modal.is_some() {
                    app_state.close_modal();
                } else if app_state
                    .shared()
                    .map(|shared| return shared.detail_panel_open())
                    .unwrap_or(false)
                {
                    app_state.open_selected_card(tx)?;
                } else if !app_state.chat_request.is_pending() {
                    let text = input.lines().join("\n");
                    app_state.submit_prompt(&text, tx)?;
                    *input = TextArea::default(input_title(Route::Chat));
                }
            }
            Event::KeyboardTab() => {
                app_state.shared_mut()?.toggle_detail_panel();
            }
            Event::KeyboardEsc() => {
                if app_state.modal.is_some() {
                    app_state.close_modal();
                } else if app_state
                    .shared()
                    .map(|shared| return shared.detail_panel_open())
                    .unwrap_or(false)
                {
                    app_state.shared_mut()?.toggle_detail_panel();
                } else {
                    app_state.navigate(Route::Home, tx)?;
                }
            }
            Event::UIScrollUp() => {
                if app_state
                    .shared()
                    .map(|shared| return shared.detail_panel_open())
                    .unwrap_or(false)
                {
                    app_state.panel_select_prev()?;
                } else {
                    app_state.scroll.up();
                }
            }
            Event::UIScrollDown() => {
                if app_state
                    .shared()
                    .map(|shared| return shared.detail_panel_open())
                    .unwrap_or(false)
                {
                    app_state.panel_select_next()?;
                } else {
                    app_state.scroll.down();
                }
            }
            Event::UIScrollPageUp() => app_state.scroll.up_page(),
            Event::UIScrollPageDown() => app_state.scroll.down_page(),
            _ => (),
        },
        Route::Upload => match event {
            Event::KeyboardCharInput(i) => {
                if app_state.upload.phase() != UploadPhase::Uploading {
                    input.input(i);
                }
            }
            Event::KeyboardPaste(text) => {
                for c in text.trim().chars() {
                    input.insert_char(c);
                }
            }
            Event::KeyboardTab() => {
                // Toggling while an upload is in flight cancels it.
                let was_uploading = app_state.upload.phase() == UploadPhase::Uploading;
                app_state.upload.toggle_kind();
                if was_uploading {
                    tx.send(Action::Abort())?;
                }
            }
            Event::KeyboardEnter() => {
                let path_str = input.lines().join("");
                if !path_str.trim().is_empty() {
                    if let Err(err) = app_state
                        .upload
                        .select_file(std::path::Path::new(path_str.trim()))
                    {
                        app_state.upload.fail_selection(&err.to_string());
                        return Ok(false);
                    }
                }

                match app_state.upload.begin_upload() {
                    Ok((file, seq)) => {
                        tx.send(Action::Upload(UploadRequest {
                            kind: app_state.upload.kind(),
                            file,
                            user_id: app_state.session_store.user_id(),
                            seq,
                        }))?;
                    }
                    Err(err) => app_state.upload.fail_selection(&err.to_string()),
                }
            }
            Event::KeyboardEsc() => app_state.navigate(Route::Home, tx)?,
            _ => (),
        },
        Route::Report => match event {
            Event::KeyboardCharInput(i) => {
                if !app_state.report_pending {
                    input.input(i);
                }
            }
            Event::KeyboardEnter() => {
                let title = input.lines().join(" ");
                app_state.submit_report(&title, tx)?;
            }
            Event::KeyboardEsc() => app_state.navigate(Route::Home, tx)?,
            _ => (),
        },
    }

    return Ok(false);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut input = TextArea::default(input_title(app_state.route));

    loop {
        terminal.draw(|frame| {
            match app_state.route {
                Route::Landing => render_landing(frame),
                Route::Login => render_auth(frame, &app_state.login_form, "Login"),
                Route::SignUp => render_auth(frame, &app_state.signup_form, "Sign up"),
                Route::Home => render_home(frame, app_state),
                Route::Chat => render_chat(frame, app_state, &input),
                Route::Upload => render_upload(frame, app_state, &input),
                Route::Report => render_report(frame, app_state, &input),
            };
        })?;

        let previous_route = app_state.route;
        match events.next().await? {
            Event::KeyboardCTRLC() => break,
            Event::AuthSucceeded(session) => app_state.handle_auth_succeeded(session),
            Event::AuthFailed(error) => app_state.handle_auth_failed(&error),
            Event::LoggedOut() => app_state.handle_logged_out(),
            Event::ChatCompleted { seq, reply } => app_state.handle_chat_completed(seq, reply)?,
            Event::ChatFailed { seq } => app_state.handle_chat_failed(seq),
            Event::ChatLogLoaded(entries) => app_state.handle_chat_log_loaded(entries),
            Event::ChatLogFailed() => app_state.handle_chat_log_failed(),
            Event::ImageLoaded(preview) => app_state.handle_image_loaded(preview),
            Event::ImageFailed() => app_state.handle_image_failed(),
            Event::UploadCompleted { seq, result } => {
                app_state.upload.finish_success(seq, result);
            }
            Event::UploadFailed { seq, detail } => {
                app_state.upload.finish_failure(seq, &detail);
            }
            Event::ReportSaved(path) => app_state.handle_report_saved(&path),
            Event::ReportFailed(error) => app_state.handle_report_failed(&error),
            Event::UITick() => (),
            event => {
                if handle_route_input(app_state, &mut input, event, &tx)? {
                    break;
                }
            }
        }

        if app_state.route != previous_route {
            input = TextArea::default(input_title(app_state.route));
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    api: Arc<HttpApi>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // One-time probe for an existing server session before the first page
    // renders. A failure here just means starting logged out.
    terminal.draw(|frame| {
        Loading::new("Checking for an existing session...")
            .render(frame, centered_rect(40, 20, frame.size()));
    })?;

    let mut session_store = SessionStore::default();
    match api.session_probe().await {
        Ok(session) => session_store.set(session),
        Err(err) => tracing::debug!(error = ?err, "no existing session"),
    }

    let mut app_state = AppState::new(session_store);
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
