//! Pet Dialog Widget
//!
//! Renders a [`Presentation`] as a modal over whatever is underneath. The
//! widget decides nothing: every choice about what to show was made by the
//! view selector in `pet_core`.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs, Widget};

use pet_core::view::{DetailView, OwnerControls, RenameView};
use pet_core::{PetSnapshot, Presentation};

use crate::panels::{
    PanelState, PanelTab, EXP_HINT, FEED_COST, HUNGER_HINT, ITEM_USE_LABEL, MOOD_HINT, PAT_COST,
    RULES, SAMPLE_ITEMS,
};
use crate::theme::{
    button_style, COST_BADGE, DIALOG_BORDER, DIM_GRAY, EXP_BLUE, FISH_ORANGE, HIGHLIGHT,
    HUNGER_AMBER, MOOD_PINK,
};
use crate::widgets::TextBlock;

/// Creation form title
pub const CREATE_TITLE: &str = "Create your Moyu Pet";

/// Loading placeholder text
pub const LOADING_TEXT: &str = "Loading...";

/// Other account without a pet
pub const OTHER_EMPTY_TEXT: &str = "This user has no pet yet~";

/// Own detail without a snapshot
pub const NO_PET_DATA_TEXT: &str = "Pet data is unavailable right now";

/// A rect `percent_x` by `percent_y` of `area`, centered in it
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// The modal pet dialog
pub struct PetDialogWidget<'a> {
    view: &'a Presentation,
    panels: &'a PanelState,
}

impl<'a> PetDialogWidget<'a> {
    /// Render `view` with `panels` as the tab/rules state
    #[must_use]
    pub fn new(view: &'a Presentation, panels: &'a PanelState) -> Self {
        Self { view, panels }
    }
}

impl Widget for PetDialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view {
            Presentation::Hidden => {}
            Presentation::CreationForm {
                name_input,
                counter,
                creating,
            } => {
                let rect = centered_rect(50, 50, area);
                Clear.render(rect, buf);
                render_creation_form(rect, buf, name_input, counter, *creating);
            }
            Presentation::Loading { title } => {
                let rect = centered_rect(70, 70, area);
                Clear.render(rect, buf);
                render_notice(rect, buf, title, LOADING_TEXT);
            }
            Presentation::OtherEmpty { title } => {
                let rect = centered_rect(70, 70, area);
                Clear.render(rect, buf);
                render_notice(rect, buf, title, OTHER_EMPTY_TEXT);
            }
            Presentation::Detail(detail) => {
                let rect = centered_rect(70, 80, area);
                Clear.render(rect, buf);
                render_detail(rect, buf, detail, self.panels);

                if self.panels.show_rules() {
                    let rules = centered_rect(60, 60, rect);
                    Clear.render(rules, buf);
                    render_rules(rules, buf);
                }
            }
        }
    }
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIALOG_BORDER))
        .title(Line::from(vec![
            Span::styled(" 🐟 ", Style::default().fg(FISH_ORANGE)),
            Span::styled(
                format!("{title} "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .title(
            Line::from(Span::styled(" [Esc] close ", Style::default().fg(DIM_GRAY)))
                .alignment(Alignment::Right),
        )
}

fn render_notice(area: Rect, buf: &mut Buffer, title: &str, text: &str) {
    let block = dialog_block(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let middle = Rect {
        y: inner.y + inner.height / 2,
        height: inner.height.min(1),
        ..inner
    };
    TextBlock::new(text).centered().render(middle, buf);
}

fn render_creation_form(area: Rect, buf: &mut Buffer, name_input: &str, counter: &str, creating: bool) {
    let block = dialog_block(CREATE_TITLE);
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new("Name your pet").render(rows[0], buf);

    let field = if name_input.is_empty() {
        Line::from(Span::styled("Enter a pet name", Style::default().fg(DIM_GRAY)))
    } else {
        Line::from(format!("{name_input}_"))
    };
    Paragraph::new(field)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(HIGHLIGHT))
                .title(Line::from(format!(" {counter} ")).alignment(Alignment::Right)),
        )
        .render(rows[1], buf);

    let button = if creating {
        Span::styled(" Creating... ", button_style(false))
    } else {
        Span::styled(" [Enter] Create pet ", button_style(true))
    };
    Paragraph::new(Line::from(button))
        .alignment(Alignment::Center)
        .render(rows[2], buf);
}

fn render_detail(area: Rect, buf: &mut Buffer, detail: &DetailView, panels: &PanelState) {
    let block = dialog_block(&detail.title).title(
        Line::from(Span::styled(" [?] rules ", Style::default().fg(DIM_GRAY)))
            .alignment(Alignment::Center),
    );
    let inner = block.inner(area);
    block.render(area, buf);

    let is_own = detail.controls.is_some();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(if is_own { 2 } else { 0 }),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    match detail.pet {
        Some(ref pet) => {
            render_header(rows[0], buf, pet, detail.controls.as_ref());
            render_gauges(rows[1], buf, pet);
        }
        None => {
            TextBlock::new(NO_PET_DATA_TEXT)
                .style(Style::default().fg(DIM_GRAY))
                .centered()
                .render(rows[0], buf);
        }
    }

    if let Some(ref controls) = detail.controls {
        render_actions(rows[2], buf, controls);
    }

    render_tabs(rows[3], rows[4], buf, panels, is_own);
}

fn render_header(area: Rect, buf: &mut Buffer, pet: &PetSnapshot, controls: Option<&OwnerControls>) {
    let level = Span::styled(
        format!(" {} ", pet.level_label()),
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
    );

    let line = match controls.map(|c| &c.rename) {
        Some(RenameView::Editing {
            input,
            counter,
            saving,
        }) => {
            let hint = if *saving {
                Span::styled("  Saving...", Style::default().fg(DIM_GRAY))
            } else {
                Span::styled("  [Enter] save  [Esc] cancel", Style::default().fg(DIM_GRAY))
            };
            Line::from(vec![
                Span::styled(format!("{input}_"), Style::default().fg(HIGHLIGHT)),
                Span::styled(format!(" {counter}"), Style::default().fg(DIM_GRAY)),
                hint,
            ])
        }
        Some(RenameView::Idle { can_edit }) => {
            let mut spans = vec![
                Span::styled(pet.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                level,
            ];
            if *can_edit {
                spans.push(Span::styled("[r] rename", Style::default().fg(DIM_GRAY)));
            }
            Line::from(spans)
        }
        None => Line::from(vec![
            Span::styled(pet.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            level,
        ]),
    };

    Paragraph::new(line).render(area, buf);
}

fn render_gauges(area: Rect, buf: &mut Buffer, pet: &PetSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(area);

    let gauges = [
        ("Mood", pet.mood, pet.max_mood, pet.mood_percent(), MOOD_PINK, MOOD_HINT),
        ("Hunger", pet.hunger, pet.max_hunger, pet.hunger_percent(), HUNGER_AMBER, HUNGER_HINT),
        ("Exp", pet.exp, pet.max_exp, pet.exp_percent(), EXP_BLUE, EXP_HINT),
    ];
    let hint_width = u16::try_from(HUNGER_HINT.len() + 2).unwrap_or(u16::MAX);

    for (row, (label, value, max, percent, color, hint)) in rows.iter().zip(gauges) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(hint_width)])
            .split(*row);

        Gauge::default()
            .gauge_style(Style::default().fg(color))
            .percent(percent)
            .label(format!("{label} {value}/{max}"))
            .render(cols[0], buf);
        Paragraph::new(Span::styled(format!("  {hint}"), Style::default().fg(DIM_GRAY)))
            .render(cols[1], buf);
    }
}

fn render_actions(area: Rect, buf: &mut Buffer, controls: &OwnerControls) {
    let feed = if controls.feed_busy {
        Span::styled(" Feeding... ", button_style(false))
    } else {
        Span::styled(" [f] Feed ", button_style(controls.feed_enabled()))
    };
    let pat = if controls.pat_busy {
        Span::styled(" Patting... ", button_style(false))
    } else {
        Span::styled(" [p] Pat ", button_style(controls.pat_enabled()))
    };

    let line = Line::from(vec![
        feed,
        Span::styled(format!(" -{FEED_COST} pts"), Style::default().fg(COST_BADGE)),
        Span::raw("    "),
        pat,
        Span::styled(format!(" -{PAT_COST} pts"), Style::default().fg(COST_BADGE)),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_tabs(bar: Rect, body: Rect, buf: &mut Buffer, panels: &PanelState, is_own: bool) {
    let tabs = PanelState::tabs(is_own);
    let selected = panels.selected_tab(is_own);
    let index = tabs.iter().position(|t| *t == selected).unwrap_or(0);

    Tabs::new(tabs.iter().map(|t| t.title()))
        .select(index)
        .style(Style::default().fg(DIM_GRAY))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
        .render(bar, buf);

    match selected {
        PanelTab::Items => {
            let lines: Vec<Line> = SAMPLE_ITEMS
                .iter()
                .map(|item| {
                    Line::from(vec![
                        Span::raw(format!("{} {} x{}  ", item.icon, item.name, item.count)),
                        Span::styled(item.effect, Style::default().fg(DIM_GRAY)),
                        Span::styled(format!("  [{ITEM_USE_LABEL}]"), button_style(false)),
                    ])
                })
                .collect();
            Paragraph::new(lines).render(body, buf);
        }
        other => {
            let middle = Rect {
                y: body.y + body.height / 2,
                height: body.height.min(1),
                ..body
            };
            TextBlock::new(other.coming_soon())
                .style(Style::default().fg(DIM_GRAY))
                .centered()
                .render(middle, buf);
        }
    }
}

fn render_rules(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(HIGHLIGHT))
        .title(" Pet rules ");
    let inner = block.inner(area);
    block.render(area, buf);

    let mut text = String::new();
    for (heading, lines) in RULES {
        text.push_str(heading);
        text.push('\n');
        for line in lines {
            text.push_str("  - ");
            text.push_str(line);
            text.push('\n');
        }
    }
    TextBlock::new(text.trim_end()).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 10);
    }

    fn screen_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_gauges_carry_hints() {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let view = Presentation::Detail(DetailView {
            title: "My Moyu Pet".to_string(),
            pet: Some(PetSnapshot::new("p1", "Bubbles")),
            controls: None,
        });
        let panels = PanelState::new();
        PetDialogWidget::new(&view, &panels).render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains(MOOD_HINT));
        assert!(text.contains(HUNGER_HINT));
        assert!(text.contains(EXP_HINT));
        assert!(text.contains("Mood 0/100"));
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let panels = PanelState::new();
        PetDialogWidget::new(&Presentation::Hidden, &panels).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
