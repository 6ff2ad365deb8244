use super::state::{ExplorerState, Focus};
use super::theme::Theme;
use crate::entities::{DailyPicture, RoverPhoto};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const SCREEN_TITLE: &str = "NASA API Example with Date Selection";
pub const DAILY_HEADING: &str = "Select a Date for Astronomy Picture of the Day (APOD)";
pub const ROVER_HEADING: &str = "Select a Date for Mars Rover Photos";
pub const LOADING_TEXT: &str = "Loading...";
pub const NO_PHOTOS_TEXT: &str = "No photos available for the selected date";

const HELP_TEXT: &str = "Tab=Switch field • 0-9/-=Type • t=Today • [ ]=Day • j/k PgUp/PgDn=Scroll • \
     Enter=Fetch • ?=Help • q=Quit";

/// Rows taken by a date field and the blank line under it
const FIELD_HEIGHT: u16 = 3;

/// Draw the whole explorer screen.
///
/// Scroll positions in `state` are clamped to what the current terminal size
/// can show, so scrolling past the end has no lasting effect.
pub fn draw(frame: &mut Frame, state: &mut ExplorerState, theme: &Theme) {
    let area = frame.area();

    // While anything is loading the sections are replaced entirely
    if state.controller.is_loading() {
        frame.render_widget(loading_indicator(theme), centered_line(area));
        return;
    }

    let help_height = if state.show_help { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Title
            Constraint::Percentage(50),      // Daily picture
            Constraint::Min(6),              // Rover photos
            Constraint::Length(help_height), // Help line
        ])
        .split(area);

    frame.render_widget(screen_title(theme), chunks[0]);
    draw_daily_section(frame, chunks[1], state, theme);
    draw_rover_section(frame, chunks[2], state, theme);
    if state.show_help {
        frame.render_widget(help_line(theme), chunks[3]);
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: area.height.min(1),
    }
}

fn loading_indicator(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        LOADING_TEXT,
        theme.colors.loading.to_ratatui(),
    )))
    .alignment(Alignment::Center)
}

fn screen_title(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        SCREEN_TITLE,
        theme.colors.title.to_ratatui_with_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
}

fn section_block(title: &'static str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.colors.border.to_ratatui())
        .title(title)
        .title_style(theme.colors.header.to_ratatui())
}

/// The date field line plus the line describing what Enter does
fn date_field(value: &str, focused: bool, action: &'static str, theme: &Theme) -> Vec<Line<'static>> {
    let (marker, style) = if focused {
        ("▸ ", theme.colors.input_focused.to_ratatui())
    } else {
        ("  ", theme.colors.input.to_ratatui())
    };
    let shown = if value.is_empty() {
        "YYYY-MM-DD".to_string()
    } else {
        value.to_string()
    };

    vec![
        Line::from(vec![
            Span::styled(marker, theme.colors.input_focused.to_ratatui()),
            Span::styled("Date: ", theme.colors.normal_text.to_ratatui()),
            Span::styled(format!("[{}]", shown), style),
        ]),
        Line::from(Span::styled(
            format!("  Enter: {}", action),
            theme.colors.dimmed.to_ratatui(),
        )),
    ]
}

fn draw_daily_section(frame: &mut Frame, area: Rect, state: &mut ExplorerState, theme: &Theme) {
    let block = section_block(DAILY_HEADING, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [field_area, body_area] =
        Layout::vertical([Constraint::Length(FIELD_HEIGHT), Constraint::Min(0)]).areas(inner);
    let field = date_field(
        state.controller.daily_date(),
        state.focus == Focus::DailyDate,
        "Fetch APOD",
        theme,
    );
    frame.render_widget(Paragraph::new(field), field_area);

    let Some(picture) = state.controller.daily_picture() else {
        state.daily_scroll = 0;
        return;
    };
    let lines = picture_lines(picture, theme);

    let width = body_area.width as usize;
    let total: usize = lines
        .iter()
        .map(|line| wrapped_rows(&line_text(line), width))
        .sum();
    // One spare row in case the estimate runs short
    let max_scroll = total.saturating_sub((body_area.height as usize).saturating_sub(1));
    state.daily_scroll = state
        .daily_scroll
        .min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((state.daily_scroll, 0));
    frame.render_widget(body, body_area);
}

fn picture_lines(picture: &DailyPicture, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        picture.title.clone(),
        theme.colors.picture_title.to_ratatui_with_modifier(Modifier::BOLD),
    ))];

    let credits: Vec<&str> = [picture.date.as_deref(), picture.copyright.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !credits.is_empty() {
        lines.push(Line::from(Span::styled(
            credits.join(" • "),
            theme.colors.dimmed.to_ratatui(),
        )));
    }

    lines.push(image_line(picture.alt_text(), &picture.image_url, theme));
    lines.push(Line::from(Span::styled(
        picture.description.clone(),
        theme.colors.normal_text.to_ratatui(),
    )));
    lines
}

/// Terminal stand-in for an `<img>`: alt text then source
fn image_line(alt: &str, src: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}] ", alt), theme.colors.normal_text.to_ratatui()),
        Span::styled(src.to_string(), theme.colors.link.to_ratatui()),
    ])
}

fn draw_rover_section(frame: &mut Frame, area: Rect, state: &mut ExplorerState, theme: &Theme) {
    let block = section_block(ROVER_HEADING, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [field_area, header_area, list_area] = Layout::vertical([
        Constraint::Length(FIELD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);
    let field = date_field(
        state.controller.rover_date(),
        state.focus == Focus::RoverDate,
        "Fetch Mars Rover Photos",
        theme,
    );
    frame.render_widget(Paragraph::new(field), field_area);

    let photos = state.controller.rover_photos();
    if photos.is_empty() {
        state.rover_offset = 0;
        frame.render_widget(
            Paragraph::new(Span::styled(NO_PHOTOS_TEXT, theme.colors.dimmed.to_ratatui())),
            header_area,
        );
        return;
    }

    let width = list_area.width as usize;
    let height = list_area.height as usize;
    let heights: Vec<usize> = photos.iter().map(|photo| photo_height(photo, width)).collect();
    let offset = state.rover_offset.min(last_page_start(&heights, height));
    let shown = visible_count(&heights[offset..], height);
    state.rover_offset = offset;

    let header = format!(
        "Mars Rover Photos: showing {}-{} of {}",
        offset + 1,
        offset + shown,
        photos.len()
    );
    frame.render_widget(
        Paragraph::new(Span::styled(header, theme.colors.header.to_ratatui())),
        header_area,
    );

    // The last photo may be cut off; it is fully shown after scrolling
    let lines: Vec<Line> = photos[offset..]
        .iter()
        .flat_map(|photo| photo_lines(photo, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), list_area);
}

/// Alt text line, then the full source on its own (wrapped) line
fn photo_lines(photo: &RoverPhoto, theme: &Theme) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(
            format!("[{}]", photo.alt_text()),
            theme.colors.normal_text.to_ratatui(),
        )),
        Line::from(Span::styled(
            photo.image_url.clone(),
            theme.colors.link.to_ratatui(),
        )),
    ]
}

fn photo_height(photo: &RoverPhoto, width: usize) -> usize {
    wrapped_rows(&format!("[{}]", photo.alt_text()), width) + wrapped_rows(&photo.image_url, width)
}

/// How many photos, starting at the first, fit completely (at least one)
fn visible_count(heights: &[usize], height: usize) -> usize {
    let mut used = 0;
    let mut count = 0;
    for &rows in heights {
        used += rows;
        if used > height {
            break;
        }
        count += 1;
    }
    count.max(1).min(heights.len())
}

/// Offset at which the final photos fill the list area
fn last_page_start(heights: &[usize], height: usize) -> usize {
    let mut used = 0;
    for (index, &rows) in heights.iter().enumerate().rev() {
        used += rows;
        if used > height {
            return (index + 1).min(heights.len() - 1);
        }
    }
    0
}

fn line_text(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// Rows `text` takes when word-wrapped to `width`; words longer than a row
/// are broken across rows
fn wrapped_rows(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }

    let mut rows = 1;
    let mut used = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            rows += 1;
        }
        let extra = len.saturating_sub(1) / width;
        rows += extra;
        used = len - extra * width;
    }
    rows
}

fn help_line(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        HELP_TEXT,
        theme.colors.help_text.to_ratatui(),
    )))
    .alignment(Alignment::Center)
}
