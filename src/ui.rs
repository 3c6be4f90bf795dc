pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    challenge::Challenge,
    clock::Clock,
    config::Theme,
    console::{Assistant, Console, Section},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

/// The score the header dares people to beat
pub const TARGET_WPM: u32 = 200;

impl<C: Clock, A: Assistant> Widget for &App<C, A> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.theme {
            Theme::Synth => render_challenge(&self.challenge, area, buf),
            Theme::Terminal => render_console(&self.console, area, buf),
        }
    }
}

fn render_challenge<C: Clock>(challenge: &Challenge<C>, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let cyan_bold_style = Style::default().patch(bold_style).fg(Color::Cyan);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let phrase = challenge.phrase();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_lines = ((phrase.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);
    let show_chart = challenge.has_finished() && !challenge.wpm_samples().is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),            // header
            Constraint::Length(1),            // padding
            Constraint::Length(prompt_lines), // prompt
            Constraint::Length(1),            // padding
            Constraint::Length(1),            // cheat warning
            Constraint::Length(1),            // scores
            Constraint::Length(1),            // status
            Constraint::Min(0),               // chart
            Constraint::Length(1),            // legend
        ])
        .split(area);

    let best = challenge
        .best_wpm()
        .map_or(String::new(), |wpm| format!("Best: {wpm:.1} wpm"));
    let header = Paragraph::new(vec![
        Line::from(Span::styled(format!("Beat my {TARGET_WPM} WPM"), cyan_bold_style)),
        Line::from(Span::styled(
            "Type this with 100% accuracy, and it will auto-submit.",
            italic_style,
        )),
        Line::from(Span::styled(best, green_bold_style)),
    ])
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let typed: Vec<char> = challenge.input().chars().collect();
    let mut spans = phrase
        .chars()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            Some(&c) if c == expected => Span::styled(expected.to_string(), green_bold_style),
            Some(_) => Span::styled(
                match expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            None if idx == typed.len() => {
                Span::styled(expected.to_string(), underlined_dim_bold_style)
            }
            None => Span::styled(expected.to_string(), dim_bold_style),
        })
        .collect::<Vec<Span>>();
    // overflow past the end of the prompt
    spans.extend(
        typed
            .iter()
            .skip(phrase.chars().count())
            .map(|c| Span::styled(c.to_string(), red_bold_style)),
    );

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    if challenge.cheated() {
        Paragraph::new(Span::styled(
            "Nice try cheater... no copy pasting allowed.",
            red_bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }

    let mut scores = vec![Span::styled(
        format!("Live {:.1} wpm", challenge.live_wpm()),
        cyan_bold_style,
    )];
    if let Some(wpm) = challenge.final_wpm() {
        scores.push(Span::styled(format!("   Final {wpm:.1} wpm"), green_bold_style));
    }
    scores.push(Span::styled(
        format!(
            "   Words: {}/{}   {:.1}s",
            challenge.words_typed(),
            challenge.target_words(),
            challenge.elapsed_secs()
        ),
        dim_bold_style,
    ));
    Paragraph::new(Line::from(scores))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let status = if challenge.is_complete() {
        Span::styled("Perfect! Logged the score.", green_bold_style)
    } else {
        Span::styled("Type accurately... cus everything counts", italic_style)
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    if show_chart {
        render_wpm_chart(challenge, chunks[7], buf);
    }

    let legend = if challenge.is_complete() {
        "(ctrl+r) reset / (tab) console / (esc)ape"
    } else {
        "(enter) done / (ctrl+r) reset / (tab) console / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[8], buf);
}

fn render_wpm_chart<C: Clock>(challenge: &Challenge<C>, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(challenge.wpm_samples(), challenge.elapsed_secs());

    let points: Vec<(f64, f64)> = challenge
        .wpm_samples()
        .iter()
        .map(|&s| s.into())
        .collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(area, buf);
}

fn section_lines<A: Assistant>(console: &Console<A>, section: Section) -> Vec<Line<'static>> {
    let profile = console.profile();
    let lines = match section {
        Section::About => profile.about_lines(),
        Section::Experience => profile.experience_lines(),
        Section::Projects => profile.project_lines(),
        Section::Skills => vec![profile.skills.join(", ")],
    };
    lines.into_iter().map(Line::from).collect()
}

fn render_console<A: Assistant>(console: &Console<A>, area: Rect, buf: &mut Buffer) {
    let green_style = Style::default().fg(Color::Green);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let indigo_bold_style = Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD);

    let log_height = (console.visible_entries().len() * 2) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN / 2)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),          // whoami
            Constraint::Min(0),             // section
            Constraint::Length(log_height), // log
            Constraint::Length(1),          // prompt
        ])
        .split(area);

    let profile = console.profile();
    Paragraph::new(vec![
        Line::from(Span::styled(profile.name.clone(), indigo_bold_style)),
        Line::from(Span::styled(profile.title.clone(), dim_style)),
    ])
    .render(chunks[0], buf);

    if let Some(section) = console.focus() {
        Paragraph::new(section_lines(console, section))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(section.to_string().to_lowercase()),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }

    let log: Vec<Line> = console
        .visible_entries()
        .iter()
        .flat_map(|entry| {
            [
                Line::from(vec![
                    Span::styled(format!("[{}] ", entry.at.format("%H:%M:%S")), dim_style),
                    Span::styled(format!("> {}", entry.cmd), green_style),
                ]),
                Line::from(entry.response.as_str()),
            ]
        })
        .collect();
    Paragraph::new(log).render(chunks[2], buf);

    let input = if console.line().is_empty() {
        Span::styled("type 'help' or ask a question with 'ask <question>'", dim_style)
    } else {
        Span::raw(console.line().to_string())
    };
    Paragraph::new(Line::from(vec![Span::styled("$ ", green_style), input]))
        .render(chunks[3], buf);
}
