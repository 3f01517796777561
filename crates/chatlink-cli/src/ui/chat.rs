use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use chatlink_sdk::{ConversationController, ReplyOutcome};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyModifiers};

use crate::app_state::AppController;
use crate::tui::Action;

pub struct ChatApp {
    controller: ConversationController,
    info_line: String,
    session_date: String,

    // UI State
    tick: usize,
    should_quit: bool,

    // Notifications
    notification: Option<(String, std::time::Instant)>,
}

impl ChatApp {
    pub fn new(controller: ConversationController, info_line: &str) -> Self {
        Self {
            controller,
            info_line: info_line.to_string(),
            session_date: Utc::now().format("%A, %B %-d, %Y").to_string(),
            tick: 0,
            should_quit: false,
            notification: None,
        }
    }

    fn show_notification(&mut self, msg: String) {
        self.notification = Some((msg, std::time::Instant::now()));
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.controller.submit(),
            KeyCode::Char(c) => {
                // The draft is replaced wholesale per keystroke.
                let mut draft = self.controller.conversation().draft().to_string();
                draft.push(c);
                self.controller.update_draft(draft);
            }
            KeyCode::Backspace => {
                let mut draft = self.controller.conversation().draft().to_string();
                draft.pop();
                self.controller.update_draft(draft);
            }
            _ => {}
        }
    }
}

impl AppController for ChatApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::ReplyResolved(outcome) => {
                if let ReplyOutcome::Unavailable(ref err) = outcome {
                    self.show_notification(format!("No reply received ({err})"));
                }
                self.controller.on_reply_resolved(outcome);
            }
            Action::Tick => self.tick = self.tick.wrapping_add(1),
            Action::Quit => self.should_quit = true,
            Action::Resize(_, _) => {}
        }

        // Clear notification
        if let Some((_, time)) = &self.notification {
            if time.elapsed().as_secs() > 3 {
                self.notification = None;
            }
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        // Top: conversation header
        let bot = self.controller.bot().display_name.clone();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(bot, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" — "),
            Span::styled(self.info_line.as_str(), Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Chatlink"));
        f.render_widget(header, chunks[0]);

        // Middle: session separator, message log, typing indicator
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("── {} ──", self.session_date),
            Style::default().fg(Color::DarkGray),
        )));
        for m in self.controller.conversation().history() {
            let prefix = if m.is_outgoing() { "->" } else { "<-" };
            let color = if m.is_outgoing() { Color::Green } else { Color::Cyan };
            lines.push(Line::from(vec![
                Span::raw(format!("{} [{} {}]: ", m.timestamp(), prefix, m.sender())),
                Span::styled(m.text().to_string(), Style::default().fg(color)),
            ]));
        }
        if self.controller.conversation().awaiting_reply() {
            let dots = ".".repeat(1 + self.tick % 3);
            lines.push(Line::from(Span::styled(
                format!("{} is typing{dots}", self.controller.bot()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            )));
        }

        // Keep the tail of the log in view.
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;
        let log = Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(Block::default().borders(Borders::ALL).title("Messages"));
        f.render_widget(log, chunks[1]);

        // Bottom: input line
        let input = Paragraph::new(self.controller.conversation().draft())
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Type message here"),
            );
        f.render_widget(input, chunks[2]);

        // Notification Overlay
        if let Some((msg, _)) = &self.notification {
            let area = centered_rect(60, 20, f.area());
            let block = Paragraph::new(msg.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Notification")
                    .style(Style::default().bg(Color::Blue).fg(Color::White)),
            );
            f.render_widget(Clear, area);
            f.render_widget(block, area);
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
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
