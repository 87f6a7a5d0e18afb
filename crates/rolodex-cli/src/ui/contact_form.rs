//! Contact form, used by both the create view and the edit view.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::form::{ContactForm, Field};

pub fn draw(f: &mut Frame, area: Rect, form: &ContactForm, title: &str) {
  let block = Block::default()
    .title(title.to_string())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let focused = form.focused();
  let mut lines: Vec<Line> = Field::ALL
    .iter()
    .map(|&field| {
      let active = field == focused;
      let label_style = if active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Cyan)
      };
      let cursor = if active { "_" } else { "" };
      Line::from(vec![
        Span::styled(format!("{:<14}", field.label()), label_style),
        Span::raw(format!("{}{cursor}", form.value(field))),
      ])
    })
    .collect();

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "A first or last name is required.",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines).block(block), area);
}
