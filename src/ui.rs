use mortgage_calc::{CalculationResult, Field, FieldName, MortgageType};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::App;

const REQUIRED_MESSAGE: &str = "This field is required";

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("Mortgage Calculator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(chunks[1]);

    render_form(f, app, body[0]);
    render_result(f, app.calculator.result(), body[1]);

    let help = Paragraph::new(
        "Tab/↓: next | Shift-Tab/↑: previous | ←/→: type | Enter: calculate | Ctrl-R: clear all | Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);
}

fn field_border(field: &Field, focused: bool) -> Style {
    if field.is_invalid() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn required_line(field: &Field) -> Paragraph<'static> {
    let text = if field.is_invalid() { REQUIRED_MESSAGE } else { "" };
    Paragraph::new(text).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Calculate Repayments");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    let state = app.calculator.state();
    let numeric = [
        (FieldName::Amount, format!("£ {}", state.amount.value)),
        (FieldName::Term, format!("{} years", state.term.value)),
        (FieldName::Rate, format!("{} %", state.rate.value)),
    ];
    for (i, (name, text)) in numeric.into_iter().enumerate() {
        let field = state.get(name);
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(field_border(field, app.focus == name))
                .title(name.label()),
        );
        f.render_widget(input, rows[i * 2]);
        f.render_widget(required_line(field), rows[i * 2 + 1]);
    }

    render_type(f, app, rows[6]);
    f.render_widget(required_line(&state.mortgage_type), rows[7]);
}

fn render_type(f: &mut Frame, app: &App, area: Rect) {
    let field = &app.calculator.state().mortgage_type;
    let selected = MortgageType::from_label(&field.value);

    let options: Vec<Line> = MortgageType::ALL
        .into_iter()
        .map(|kind| {
            if selected == Some(kind) {
                Line::from(format!("(•) {}", kind.label()))
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("( ) {}", kind.label()))
            }
        })
        .collect();

    let input = Paragraph::new(options).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(field_border(field, app.focus == FieldName::Type))
            .title(FieldName::Type.label()),
    );
    f.render_widget(input, area);
}

fn render_result(f: &mut Frame, result: &CalculationResult, area: Rect) {
    let text = if result.computed {
        vec![
            Line::from(Span::styled(
                "Your results",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(
                "Your results are shown below based on the information you provided. \
                 To adjust the results, edit the form and press Enter again.",
            )
            .style(Style::default().fg(Color::DarkGray)),
            Line::from(""),
            Line::from("Your monthly repayments"),
            Line::from(Span::styled(
                format!("£{}", result.monthly_payment),
                Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Total you'll repay over the term"),
            Line::from(Span::styled(
                format!("£{}", result.total_repayments),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                "Results shown here",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(
                "Complete the form and press Enter to see what your monthly repayments would be.",
            )
            .style(Style::default().fg(Color::DarkGray)),
        ]
    };

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_placeholder_before_calculation() {
        let screen = rendered(&App::default());
        assert!(screen.contains("Results shown here"));
        assert!(!screen.contains("Your results"));
        assert!(!screen.contains(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_required_messages_after_empty_submit() {
        let mut app = App::default();
        app.calculator.submit();
        let screen = rendered(&app);
        assert_eq!(screen.matches(REQUIRED_MESSAGE).count(), 4);
    }

    #[test]
    fn test_results_are_shown() {
        let mut app = App::default();
        app.calculator.edit(FieldName::Amount, "100000").unwrap();
        app.calculator.edit(FieldName::Term, "30").unwrap();
        app.calculator.edit(FieldName::Rate, "5.25").unwrap();
        app.calculator.select_type(MortgageType::InterestOnly);
        app.calculator.submit();

        let screen = rendered(&app);
        assert!(screen.contains("Your results"));
        assert!(screen.contains("£437.50"));
        assert!(screen.contains("£257,500.00"));
        assert!(screen.contains("(•) Interest only"));
        assert!(screen.contains("£ 100,000"));
    }
}
