//! Contact view — read display of a single contact.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use serde_json::Value;

use crate::app::App;

/// Render the selected contact into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(contact) = &app.contact else {
    let block = Block::default()
      .title(" Contact ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
      Paragraph::new("No contact found.")
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", contact.display_name()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut lines = vec![
    row("first name", contact.first_name.clone().unwrap_or_default()),
    row("last name", contact.last_name.clone().unwrap_or_default()),
  ];

  for (key, value) in &contact.extra {
    match value {
      Value::Object(map) => {
        for (sub, v) in map {
          lines.push(row(&format!("{key}.{sub}"), render_value(v)));
        }
      }
      v => lines.push(row(key, render_value(v))),
    }
  }

  lines.push(Line::from(""));
  lines.push(Line::from(vec![
    Span::styled(
      format!("{:<16}", "created"),
      Style::default().fg(Color::DarkGray),
    ),
    Span::styled(
      contact.create_date.format("%Y-%m-%d %H:%M UTC").to_string(),
      Style::default().fg(Color::DarkGray),
    ),
  ]));
  lines.push(Line::from(Span::styled(
    format!("{:<16}{}", "id", contact.id),
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn row(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<16}"),
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}

fn render_value(v: &Value) -> String {
  match v {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}
