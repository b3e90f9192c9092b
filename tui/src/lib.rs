//! TUI rendering for the task list using ratatui.
//!
//! One screen: a name field with an "Add Task" button on top, the incomplete
//! tasks below it, and a status bar.

mod format;
mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, HighlightSpacing, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use tasklist_engine::{App, HitRegions, InputMode, ListViewport, Region, Task};

use self::format::{format_age, single_line, truncate_to_width};

const ADD_BUTTON_LABEL: &str = "Add Task";
const ADD_BUTTON_WIDTH: u16 = 12;
const NAME_PLACEHOLDER: &str = "Task Name";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let [header, input_row, list_area, status] = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(3), // Name field + button
        Constraint::Min(3),    // Tasks
        Constraint::Length(1), // Status bar
    ])
    .margin(1)
    .areas(frame.area());

    let [field_area, button_area] =
        Layout::horizontal([Constraint::Min(8), Constraint::Length(ADD_BUTTON_WIDTH)])
            .areas(input_row);

    draw_header(frame, header, &palette);
    draw_name_field(frame, app, field_area, &palette, &glyphs);
    draw_add_button(frame, app, button_area, &palette, &glyphs);
    let list = draw_tasks(frame, app, list_area, &palette, &glyphs);
    draw_status_bar(frame, app, status, &palette, &glyphs);

    app.set_hit_regions(HitRegions {
        name_field: region(field_area),
        add_button: region(button_area),
        list,
    });
}

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

fn draw_header(frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = Line::from(Span::styled(
        " Task List",
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_name_field(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let focused = app.input_mode() == InputMode::Insert;
    let border_color = if focused {
        palette.green
    } else {
        palette.bg_border
    };
    let block = theme::bordered(glyphs)
        .border_style(Style::default().fg(border_color))
        .title(" Task Name ");
    let inner = block.inner(area);

    let draft = app.draft();
    let cursor_cells = draft.text_before_cursor().width();
    // Keep the cursor inside the field by scrolling long names left.
    let scroll = cursor_cells.saturating_sub(usize::from(inner.width.saturating_sub(1)));

    let content = if draft.text().is_empty() {
        Line::from(Span::styled(
            NAME_PLACEHOLDER,
            Style::default().fg(palette.text_muted),
        ))
    } else {
        Line::from(Span::styled(
            draft.text().to_string(),
            Style::default().fg(palette.text_primary),
        ))
    };

    let field = Paragraph::new(content)
        .block(block)
        .scroll((0, scroll as u16));
    frame.render_widget(field, area);

    if focused && inner.width > 0 {
        let x = inner.x + (cursor_cells - scroll) as u16;
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_add_button(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let enabled = app.can_add();
    let border_color = if enabled {
        palette.primary
    } else {
        palette.bg_border
    };
    let button = Paragraph::new(Line::from(Span::styled(
        ADD_BUTTON_LABEL,
        styles::button(palette, enabled),
    )))
    .alignment(Alignment::Center)
    .block(theme::bordered(glyphs).border_style(Style::default().fg(border_color)));
    frame.render_widget(button, area);
}

fn draw_tasks(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) -> ListViewport {
    let tasks = app.tasks();
    let focused = app.input_mode() == InputMode::Normal;
    let border_color = if focused {
        palette.primary
    } else {
        palette.bg_border
    };
    let block = theme::bordered(glyphs)
        .border_style(Style::default().fg(border_color))
        .title(format!(" Tasks ({}) ", tasks.len()));
    let inner = block.inner(area);

    if tasks.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing to do.",
                Style::default().fg(palette.text_secondary),
            )),
            Line::from(Span::styled(
                "Type a name above and press Enter to add a task.",
                styles::key_hint(palette),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return ListViewport::default();
    }

    let marker = format!("{} ", glyphs.selected);
    let row_width = usize::from(inner.width).saturating_sub(marker.width());
    let now = Utc::now();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| ListItem::new(task_line(task, row_width, now, palette, glyphs)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol(marker)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_style(if focused {
            styles::selected_row(palette)
        } else {
            Style::default()
        });

    let previous_offset = app.hit_regions().list.offset;
    let mut state = ListState::default()
        .with_offset(previous_offset.min(tasks.len().saturating_sub(1)))
        .with_selected(app.selected_index());
    frame.render_stateful_widget(list, area, &mut state);

    ListViewport {
        area: region(inner),
        offset: state.offset(),
    }
}

/// `○ name ........ 5m ago`, with the name truncated before the age is dropped.
fn task_line<'a>(
    task: &Task,
    width: usize,
    now: chrono::DateTime<Utc>,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Line<'a> {
    let prefix = format!("{} ", glyphs.open_task);
    let age = format_age(now, task.date_added);
    let available = width.saturating_sub(prefix.width());

    let name = single_line(task.name.as_str());
    let name_style = Style::default().fg(palette.text_primary);
    let mut spans = vec![Span::styled(prefix, Style::default().fg(palette.yellow))];

    // Need room for the age plus at least a short name and a gap.
    if available >= age.width() + 8 {
        let name_budget = available - age.width() - 1;
        let name = truncate_to_width(&name, name_budget);
        let gap = available
            .saturating_sub(name.width())
            .saturating_sub(age.width())
            .max(1);
        spans.push(Span::styled(name, name_style));
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(age, styles::key_hint(palette)));
    } else {
        spans.push(Span::styled(
            truncate_to_width(&name, available),
            name_style,
        ));
    }
    Line::from(spans)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let mode = app.input_mode();
    let badge_style = match mode {
        InputMode::Normal => styles::mode_normal(palette),
        InputMode::Insert => styles::mode_insert(palette),
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", mode.label()), badge_style),
        Span::styled(
            format!(
                " {} open {} {} done ",
                app.tasks().len(),
                glyphs.separator,
                app.completed_count()
            ),
            Style::default().fg(palette.text_secondary),
        ),
    ];

    let hints: &[(&str, &str)] = match mode {
        InputMode::Normal => &[
            ("i", "name"),
            ("j/k", "move"),
            ("enter", "done"),
            ("q", "quit"),
        ],
        InputMode::Insert => &[("enter", "add"), ("esc", "list"), ("ctrl+c", "quit")],
    };
    for (key, action) in hints {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
