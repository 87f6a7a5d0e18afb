//! TUI rendering — orchestrates all panes.

pub mod contact_detail;
pub mod contact_form;
pub mod contact_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Route};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if app.alert.is_some() {
    draw_alert(f, area, app);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" rolodex  {}", app.route.path()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{}  {date} ", app.client.base_url()),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match &app.route {
    Route::List => contact_list::draw(f, area, app),
    Route::NewContact => contact_form::draw(f, area, &app.form, " New contact "),
    Route::Contact(_) if app.edit_mode => {
      contact_form::draw(f, area, &app.form, " Edit contact ")
    }
    Route::Contact(_) => contact_detail::draw(f, area, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.route {
    Route::List => ("LIST", "↑↓/jk navigate  Enter open  n new  r refresh  q quit"),
    Route::NewContact => ("NEW", "Tab/↑↓ field  Enter save  Esc back"),
    Route::Contact(_) if app.edit_mode => ("EDIT", "Tab/↑↓ field  Enter save  Esc cancel"),
    Route::Contact(_) => ("CONTACT", "e edit  d delete  Esc back  q quit"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Alert ────────────────────────────────────────────────────────────────────

fn draw_alert(f: &mut Frame, area: Rect, app: &App) {
  let Some(alert) = &app.alert else { return };

  let popup = centered(area, 60, 7);
  let block = Block::default()
    .title(" Error ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::from(Span::styled(
      alert.message,
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      alert.detail.clone(),
      Style::default().fg(Color::DarkGray),
    )),
    Line::from(""),
    Line::from(Span::styled(
      "Press any key to continue.",
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
    popup,
  );
}

/// A `width`% wide, `height` rows tall rectangle centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let w = (u32::from(area.width) * u32::from(width.min(100)) / 100) as u16;
  let h = height.min(area.height);
  Rect {
    x:      area.x + (area.width - w) / 2,
    y:      area.y + (area.height - h) / 2,
    width:  w,
    height: h,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn centered_fits_inside_very_wide_terminals() {
    let area = Rect { x: 0, y: 0, width: 4000, height: 50 };
    let popup = centered(area, 60, 7);
    assert_eq!(popup.width, 2400);
    assert_eq!(popup.height, 7);
    assert_eq!(popup.x, 800);
    assert_eq!(popup.y, 21);
  }

  #[test]
  fn centered_clamps_to_small_areas() {
    let area = Rect { x: 2, y: 1, width: 10, height: 3 };
    let popup = centered(area, 60, 7);
    assert_eq!(popup, Rect { x: 4, y: 1, width: 6, height: 3 });
  }
}
