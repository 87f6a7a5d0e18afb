//! Contact list view.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the contact list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Contacts ({}) ", app.contacts.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.contacts.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No contacts yet. Press n to add one.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .contacts
    .iter()
    .map(|contact| {
      let name = contact.display_name();
      let name = if name.is_empty() { "—".to_string() } else { name };
      let email = contact
        .extra
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

      ListItem::new(Line::from(vec![
        Span::raw(format!("{name:<32}")),
        Span::styled(email.to_string(), Style::default().fg(Color::DarkGray)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("› "),
    area,
    &mut state,
  );
}
