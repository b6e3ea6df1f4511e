//! Card list rendering for the user and access feeds.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::render::{CardFeed, CardLine, RenderedCard};

use super::theme::{level_color, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

/// Render the feed newest-first, skipping `scroll` cards from the top.
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &CardFeed, scroll: usize) {
    if cards.is_empty() {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Waiting for records...",
            Style::default().fg(COLOR_DIM),
        )));
        frame.render_widget(waiting, area);
        return;
    }

    let mut y = area.y;
    let bottom = area.y + area.height;
    for card in cards.iter().skip(scroll) {
        if y >= bottom {
            break;
        }
        let wanted = card.content_height() as u16 + 2;
        let height = wanted.min(bottom - y);
        let card_area = Rect::new(area.x, y, area.width, height);
        render_card(frame, card_area, card);
        y += height;
    }
}

/// Cut `text` to at most `max` display columns, ending with "..." when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max >= 3 {
        out.push_str("...");
    }
    out
}

fn render_card(frame: &mut Frame, area: Rect, card: &RenderedCard) {
    let color = level_color(&card.classification);
    // Borders, padding and the timestamp share the top row with the header
    let header_room = (area.width as usize).saturating_sub(card.when.width() + 8);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Line::from(Span::styled(
            format!(" {} ", truncate_to_width(&card.header, header_room)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", card.when),
                Style::default().fg(COLOR_DIM),
            ))
            .right_aligned(),
        );

    frame.render_widget(Paragraph::new(card_lines(card)).block(block), area);
}

/// Text rows of a card, in display order.
pub fn card_lines(card: &RenderedCard) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(card.content_height());

    if let Some(title) = &card.title {
        lines.push(Line::from(Span::styled(
            title.clone(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(subtitle) = &card.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().fg(COLOR_DIM),
        )));
    }
    lines.extend(card.body.iter().map(body_line));
    if let Some(footer) = &card.footer {
        lines.push(Line::from(Span::styled(
            footer.clone(),
            Style::default().fg(COLOR_BORDER),
        )));
    }

    lines
}

fn body_line(line: &CardLine) -> Line<'static> {
    match line.label {
        Some(label) => Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(COLOR_DIM)),
            Span::raw(line.value.clone()),
        ]),
        None => Line::from(line.value.clone()),
    }
}
