use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tokio::sync::mpsc;

use common::models::{AssetDescriptor, SignalKind};
use strategy::classifier::{BUY_HYPE_SCORE, BUY_PUMP_PROBABILITY};
use strategy::services::{AlertService, AssetEvaluation};

/// Outcome of a background task, applied to dashboard state on the next
/// frame. Events carry the symbol they were computed for so a result that
/// lands after the user switched assets can be dropped.
#[derive(Debug)]
pub enum UiEvent {
    Evaluated(Box<AssetEvaluation>),
    EvaluationFailed {
        symbol: String,
        reason: String,
    },
    NotifySettled {
        symbol: String,
        outcome: Result<(), String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum NotifyState {
    Idle,
    Sending,
    Delivered,
    Failed(String),
}

/// Interactive single-asset view over the evaluation pipeline.
///
/// Evaluations and alert sends run as spawned tasks so the render loop never
/// blocks on the network; results come back over a channel and are applied
/// between frames.
pub struct Dashboard {
    service: Arc<AlertService>,
    assets: Vec<AssetDescriptor>,
    selected: usize,
    evaluation: Option<AssetEvaluation>,
    evaluating: bool,
    eval_error: Option<String>,
    notify_state: NotifyState,
    events_tx: mpsc::Sender<UiEvent>,
    events_rx: mpsc::Receiver<UiEvent>,
    running: bool,
}

impl Dashboard {
    /// `assets` must be non-empty; there is always a selected asset.
    pub fn new(service: Arc<AlertService>, assets: Vec<AssetDescriptor>) -> Self {
        let (events_tx, events_rx) = mpsc::channel(16);

        Self {
            service,
            assets,
            selected: 0,
            evaluation: None,
            evaluating: false,
            eval_error: None,
            notify_state: NotifyState::Idle,
            events_tx,
            events_rx,
            running: true,
        }
    }

    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.request_evaluation();

        while self.running {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code);
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.apply_event(event);
            }

            terminal.draw(|f| self.render(f))?;
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn selected_asset(&self) -> &AssetDescriptor {
        &self.assets[self.selected]
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Left => {
                self.selected = (self.selected + self.assets.len() - 1) % self.assets.len();
                self.evaluation = None;
                self.request_evaluation();
            }
            KeyCode::Right => {
                self.selected = (self.selected + 1) % self.assets.len();
                self.evaluation = None;
                self.request_evaluation();
            }
            KeyCode::Char('r') => self.request_evaluation(),
            KeyCode::Char('n') => self.request_notify(),
            _ => (),
        }
    }

    fn request_evaluation(&mut self) {
        self.evaluating = true;
        self.eval_error = None;
        self.notify_state = NotifyState::Idle;

        let service = self.service.clone();
        let asset = self.selected_asset().clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = match service.evaluate_one(&asset).await {
                Ok(evaluation) => UiEvent::Evaluated(Box::new(evaluation)),
                Err(e) => UiEvent::EvaluationFailed {
                    symbol: asset.symbol.clone(),
                    reason: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    fn request_notify(&mut self) {
        let Some(evaluation) = self.evaluation.clone() else {
            return;
        };
        self.notify_state = NotifyState::Sending;

        let service = self.service.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let outcome = service
                .dispatch(&evaluation)
                .await
                .map_err(|e| e.to_string());
            let _ = tx
                .send(UiEvent::NotifySettled {
                    symbol: evaluation.symbol,
                    outcome,
                })
                .await;
        });
    }

    fn apply_event(&mut self, event: UiEvent) {
        let current = self.selected_asset().symbol.as_str();

        match event {
            UiEvent::Evaluated(evaluation) => {
                if evaluation.symbol == current {
                    self.evaluation = Some(*evaluation);
                    self.evaluating = false;
                }
            }
            UiEvent::EvaluationFailed { symbol, reason } => {
                if symbol == current {
                    self.evaluating = false;
                    self.eval_error = Some(reason);
                }
            }
            UiEvent::NotifySettled { symbol, outcome } => {
                if symbol == current {
                    self.notify_state = match outcome {
                        Ok(()) => NotifyState::Delivered,
                        Err(reason) => NotifyState::Failed(reason),
                    };
                }
            }
        }
    }

    fn render(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(9),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(f.size());

        self.render_header(f, chunks[0]);
        self.render_metrics(f, chunks[1]);
        self.render_signal(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>, area: Rect) {
        let status = if self.evaluating {
            Span::styled("EVALUATING", Style::default().fg(Color::Yellow))
        } else if self.evaluation.as_ref().is_some_and(|e| e.degraded) {
            Span::styled("DEGRADED", Style::default().fg(Color::Red))
        } else {
            Span::styled("LIVE", Style::default().fg(Color::Green))
        };

        let mut selector = vec![Span::raw("Assets: ")];
        for (i, asset) in self.assets.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            selector.push(Span::styled(format!(" {} ", asset.symbol), style));
            selector.push(Span::raw(" "));
        }

        let header = Paragraph::new(Text::from(vec![
            Line::from(vec![
                Span::styled(
                    "PUMP ALERT ",
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                ),
                status,
            ]),
            Line::from(selector),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));

        f.render_widget(header, area);
    }

    fn render_metrics(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} projection", self.selected_asset().symbol));

        let inner_area = block.inner(area);
        f.render_widget(block, area);

        if inner_area.height < 3 || inner_area.width < 30 {
            return;
        }

        let Some(evaluation) = &self.evaluation else {
            let placeholder = if let Some(reason) = &self.eval_error {
                Paragraph::new(Span::styled(
                    format!("Evaluation failed: {}", reason),
                    Style::default().fg(Color::Red),
                ))
            } else {
                Paragraph::new(format!("Evaluating {}...", self.selected_asset().symbol))
            };
            f.render_widget(placeholder, inner_area);
            return;
        };

        let projection = &evaluation.projection;

        let price_note = if evaluation.degraded {
            Span::styled("FALLBACK PRICE", Style::default().fg(Color::Red))
        } else {
            Span::styled("live quote", Style::default().fg(Color::DarkGray))
        };

        let rows = vec![
            Row::new(vec![
                Cell::from("Spot price"),
                Cell::from(format!("US${:.2}", evaluation.price)),
                Cell::from(price_note),
            ]),
            Row::new(vec![
                Cell::from("Median return"),
                Cell::from(Span::styled(
                    format!("{:+.1}%", projection.median_return * 100.0),
                    Style::default().fg(return_color(projection.median_return)),
                )),
                Cell::from(""),
            ]),
            Row::new(vec![
                Cell::from("95th percentile"),
                Cell::from(Span::styled(
                    format!("{:+.1}%", projection.p95_return * 100.0),
                    Style::default().fg(return_color(projection.p95_return)),
                )),
                Cell::from(""),
            ]),
            Row::new(vec![
                Cell::from("Pump probability"),
                Cell::from(Span::styled(
                    format!("{:.0}%", projection.pump_probability * 100.0),
                    Style::default().fg(threshold_color(
                        projection.pump_probability,
                        BUY_PUMP_PROBABILITY,
                    )),
                )),
                Cell::from(""),
            ]),
            Row::new(vec![
                Cell::from("Hype score"),
                Cell::from(Span::styled(
                    format!("{:.0}%", evaluation.hype * 100.0),
                    Style::default().fg(threshold_color(evaluation.hype, BUY_HYPE_SCORE)),
                )),
                Cell::from(""),
            ]),
        ];

        let table = Table::new(rows)
            .header(
                Row::new(vec!["Metric", "Value", ""])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .widths(&[
                Constraint::Length(18),
                Constraint::Length(12),
                Constraint::Length(16),
            ]);

        f.render_widget(table, inner_area);
    }

    fn render_signal(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Signal");
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        let Some(evaluation) = &self.evaluation else {
            return;
        };

        let color = match evaluation.signal.kind {
            SignalKind::Buy => Color::Green,
            SignalKind::Sell => Color::Red,
            SignalKind::Neutral => Color::Gray,
        };

        let mut lines = vec![
            Line::from(Span::styled(
                evaluation.signal.kind.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "evaluated at {}",
                    evaluation.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        lines.extend(
            evaluation
                .signal
                .rationale
                .lines()
                .map(|line| Line::from(line.to_string())),
        );

        f.render_widget(Paragraph::new(Text::from(lines)), inner_area);
    }

    fn render_footer(&self, f: &mut Frame<CrosstermBackend<io::Stdout>>, area: Rect) {
        let notify_status = match &self.notify_state {
            NotifyState::Idle => Span::raw(""),
            NotifyState::Sending => {
                Span::styled("sending alert...", Style::default().fg(Color::Yellow))
            }
            NotifyState::Delivered => {
                Span::styled("alert delivered", Style::default().fg(Color::Green))
            }
            NotifyState::Failed(reason) => Span::styled(
                format!("send failed: {}", reason),
                Style::default().fg(Color::Red),
            ),
        };

        let footer = Paragraph::new(Line::from(vec![
            Span::raw("q quit | ←/→ switch asset | r re-evaluate | n send alert   "),
            notify_status,
        ]))
        .block(Block::default().borders(Borders::TOP));

        f.render_widget(footer, area);
    }
}

fn return_color(value: f64) -> Color {
    if value < 0.0 { Color::Red } else { Color::Green }
}

fn threshold_color(value: f64, bar: f64) -> Color {
    if value > bar { Color::Green } else { Color::Gray }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;

    use common::models::{PriceSnapshot, ProjectionResult, tracked_assets};
    use common::providers::{HypeProvider, PriceProvider};
    use strategy::classifier::classify;
    use strategy::projection::ProjectionConfig;

    struct StubPrices;

    #[async_trait]
    impl PriceProvider for StubPrices {
        async fn fetch_prices(&self, _assets: &[AssetDescriptor]) -> PriceSnapshot {
            PriceSnapshot::fallback()
        }
    }

    struct StubHype;

    #[async_trait]
    impl HypeProvider for StubHype {
        async fn hype_score(&self, _symbol: &str) -> f64 {
            0.5
        }
    }

    fn dashboard() -> Dashboard {
        let service = Arc::new(AlertService::new(
            Arc::new(StubPrices),
            Arc::new(StubHype),
            ProjectionConfig {
                horizon_days: 3,
                sample_count: 16,
            },
        ));

        Dashboard::new(service, tracked_assets())
    }

    fn evaluation_for(symbol: &str) -> AssetEvaluation {
        let projection = ProjectionResult {
            median_return: 0.02,
            p95_return: 0.20,
            pump_probability: 0.3,
        };

        AssetEvaluation {
            symbol: symbol.to_string(),
            price: 100.0,
            degraded: false,
            signal: classify(100.0, &projection, 0.5),
            projection,
            hype: 0.5,
            evaluated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut dash = dashboard();
        dash.evaluating = true;

        // Selected asset is TAO; a late FET result must not land.
        dash.apply_event(UiEvent::Evaluated(Box::new(evaluation_for("FET"))));
        assert!(dash.evaluation.is_none());
        assert!(dash.evaluating);

        dash.apply_event(UiEvent::Evaluated(Box::new(evaluation_for("TAO"))));
        assert!(dash.evaluation.is_some());
        assert!(!dash.evaluating);
    }

    #[test]
    fn test_failed_evaluation_reports_the_reason() {
        let mut dash = dashboard();
        dash.evaluating = true;

        dash.apply_event(UiEvent::EvaluationFailed {
            symbol: "TAO".to_string(),
            reason: "bad volatility".to_string(),
        });

        assert!(!dash.evaluating);
        assert_eq!(dash.eval_error.as_deref(), Some("bad volatility"));
    }

    #[test]
    fn test_notify_outcome_updates_state() {
        let mut dash = dashboard();
        dash.evaluation = Some(evaluation_for("TAO"));
        dash.notify_state = NotifyState::Sending;

        // Stale outcome for another asset is dropped.
        dash.apply_event(UiEvent::NotifySettled {
            symbol: "FET".to_string(),
            outcome: Ok(()),
        });
        assert_eq!(dash.notify_state, NotifyState::Sending);

        dash.apply_event(UiEvent::NotifySettled {
            symbol: "TAO".to_string(),
            outcome: Ok(()),
        });
        assert_eq!(dash.notify_state, NotifyState::Delivered);

        dash.apply_event(UiEvent::NotifySettled {
            symbol: "TAO".to_string(),
            outcome: Err("telegram down".to_string()),
        });
        assert_eq!(dash.notify_state, NotifyState::Failed("telegram down".to_string()));
    }

    #[tokio::test]
    async fn test_selection_wraps_and_resets_state() {
        let mut dash = dashboard();
        dash.evaluation = Some(evaluation_for("TAO"));
        dash.notify_state = NotifyState::Delivered;

        dash.handle_key(KeyCode::Right);
        assert_eq!(dash.selected_asset().symbol, "FET");
        assert!(dash.evaluating);
        assert!(dash.evaluation.is_none());
        assert_eq!(dash.notify_state, NotifyState::Idle);

        for _ in 0..4 {
            dash.handle_key(KeyCode::Right);
        }
        assert_eq!(dash.selected_asset().symbol, "TAO");

        dash.handle_key(KeyCode::Left);
        assert_eq!(dash.selected_asset().symbol, "QUBIC");

        dash.handle_key(KeyCode::Char('q'));
        assert!(!dash.running);
    }

    #[tokio::test]
    async fn test_request_evaluation_round_trips() {
        let mut dash = dashboard();
        dash.request_evaluation();

        let event = dash.events_rx.recv().await.unwrap();
        dash.apply_event(event);

        assert!(!dash.evaluating);
        let evaluation = dash.evaluation.expect("evaluation should land");
        assert_eq!(evaluation.symbol, "TAO");
        assert!(evaluation.degraded);
    }
}
