use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;

use crate::format::{format_currency, format_currency_precise, format_latency, format_number};
use crate::models::{CalculationResult, CostBreakdown, LatencyBreakdown, ScenarioMetrics};
use crate::tui::app::{App, Tab};

pub fn run_dashboard(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app;

    // Main loop
    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => app.quit(),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.selected_tab.scenario() {
        None => draw_overview(f, app, chunks[1]),
        Some(scenario) => {
            if let Some(result) = app.result_for(scenario) {
                draw_scenario(f, result, chunks[1]);
            }
        }
    }

    draw_footer(f, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let titles = vec!["Overview", "Long Context", "With Cache", "Just Grep", "RAG"];
    let selected = match app.selected_tab {
        Tab::Overview => 0,
        Tab::NoCache => 1,
        Tab::Cache => 2,
        Tab::Grep => 3,
        Tab::Rag => 4,
    };

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" RAG Compare "))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("←→", Style::default().fg(Color::Cyan)),
        Span::raw(" to switch scenarios, "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" to quit"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_overview(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    // Scenario summary line
    let kb = &app.params.knowledge_base;
    let mut summary = vec![Line::from(format!(
        "Knowledge base: {} pages ({} tokens) · {} requests/day · plan '{}'",
        format_number(kb.pages),
        format_number(kb.total_tokens()),
        format_number(app.params.requests_per_day),
        app.params.plan_key
    ))];
    if let (Some(cheapest), Some(fastest)) = (app.cheapest(), app.fastest()) {
        summary.push(Line::from(vec![
            Span::raw("Cheapest: "),
            Span::styled(cheapest.scenario_name, Style::default().fg(Color::Green)),
            Span::raw(format!(" ({}/mo)   Fastest: ", format_currency(cheapest.monthly_cost))),
            Span::styled(fastest.scenario_name, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" ({:.2}s)", fastest.avg_time_seconds)),
        ]));
    }
    let header = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL).title(" Scenario "));
    f.render_widget(header, chunks[0]);

    // Comparison table
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<26} {:>13} {:>13} {:>10} {:>13}",
            "Scenario", "Monthly", "Per Request", "Avg Time", "Input Tokens"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for result in &app.results {
        lines.push(Line::from(format!(
            "{:<26} {:>13} {:>13} {:>9.2}s {:>13}",
            result.scenario_name,
            format_currency(result.monthly_cost),
            format_currency_precise(result.cost_per_request, 4),
            result.avg_time_seconds,
            format_number(result.input_tokens)
        )));
    }
    let table = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Comparison "));
    f.render_widget(table, chunks[1]);
}

fn draw_scenario(f: &mut Frame, result: &CalculationResult, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_cost_panel(f, result, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_latency_panel(f, result, right[0]);
    draw_metrics_panel(f, result, right[1]);
}

fn cost_rows(result: &CalculationResult) -> Vec<(&'static str, f64)> {
    match &result.cost_breakdown {
        CostBreakdown::LongContext { input, output } | CostBreakdown::Grep { input, output } => {
            vec![("Input / request", *input), ("Output / request", *output)]
        }
        CostBreakdown::Cached {
            cache_write,
            cache_storage,
            cache_read,
            query_input,
            output,
        } => vec![
            ("Cache write / month", *cache_write),
            ("Cache storage / month", *cache_storage),
            ("Cache read / request", *cache_read),
            ("Query input / request", *query_input),
            ("Output / request", *output),
        ],
        CostBreakdown::Rag {
            llm_input,
            llm_output,
            vector_db_base,
            embedding,
            rerank,
            vector_db_per_request,
        } => vec![
            ("LLM input / request", *llm_input),
            ("LLM output / request", *llm_output),
            ("Vector DB base / month", *vector_db_base),
            ("Embedding / month", *embedding),
            ("Rerank / month", *rerank),
            ("Vector DB / request", *vector_db_per_request),
        ],
    }
}

fn draw_cost_panel(f: &mut Frame, result: &CalculationResult, area: Rect) {
    let mut items: Vec<ListItem> = vec![
        ListItem::new(Line::from(vec![
            Span::raw("Monthly cost:    "),
            Span::styled(
                format_currency(result.monthly_cost),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ])),
        ListItem::new(format!(
            "Cost / request:  {}",
            format_currency_precise(result.cost_per_request, 4)
        )),
        ListItem::new(""),
    ];
    for (label, amount) in cost_rows(result) {
        items.push(ListItem::new(format!(
            "{:<24} {}",
            label,
            format_currency_precise(amount, 4)
        )));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Cost Breakdown "));
    f.render_widget(list, area);
}

fn draw_latency_panel(f: &mut Frame, result: &CalculationResult, area: Rect) {
    let (ttft, decode, total, throughput) = format_latency(&result.latency);
    let mut items = vec![
        ListItem::new(format!("TTFT:        {}", ttft)),
        ListItem::new(format!("Decode:      {}", decode)),
        ListItem::new(format!("Total:       {}", total)),
        ListItem::new(format!("Throughput:  {}", throughput)),
    ];
    if let LatencyBreakdown::Rag(rag) = &result.latency {
        items.push(ListItem::new(format!("Retrieval:   {:.1}ms", rag.retrieval * 1000.0)));
        items.push(ListItem::new(format!("Reranking:   {:.1}ms", rag.reranking * 1000.0)));
        items.push(ListItem::new(format!(
            "Indexing:    {:.1}ms / request",
            rag.indexing_amortized * 1000.0
        )));
        items.push(ListItem::new(format!(
            "E2E w/o idx: {:.2}s",
            rag.e2e_without_indexing
        )));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Latency "));
    f.render_widget(list, area);
}

fn metric_rows(result: &CalculationResult) -> Vec<String> {
    match &result.metrics {
        ScenarioMetrics::LongContext {
            kb_size_pages,
            kb_size_tokens,
            monthly_requests,
        } => vec![
            format!("KB pages:          {}", format_number(*kb_size_pages)),
            format!("KB tokens:         {}", format_number(*kb_size_tokens)),
            format!("Monthly requests:  {}", format_number(*monthly_requests)),
        ],
        ScenarioMetrics::Cached {
            kb_size_pages,
            kb_size_tokens,
            monthly_requests,
            cache_writes_per_month,
            cache_storage_hours_per_month,
        } => vec![
            format!("KB pages:          {}", format_number(*kb_size_pages)),
            format!("KB tokens:         {}", format_number(*kb_size_tokens)),
            format!("Monthly requests:  {}", format_number(*monthly_requests)),
            format!("Cache writes/mo:   {}", cache_writes_per_month),
            format!("Storage hours/mo:  {}", cache_storage_hours_per_month),
        ],
        ScenarioMetrics::Grep {
            monthly_requests,
            llm_calls,
            failed_attempts,
            tokens_per_call,
        } => {
            let calls: Vec<String> = tokens_per_call.iter().map(|t| format_number(*t)).collect();
            vec![
                format!("Monthly requests:  {}", format_number(*monthly_requests)),
                format!("LLM calls:         {}", llm_calls),
                format!("Failed attempts:   {}", failed_attempts),
                format!("Tokens per call:   {}", calls.join(" | ")),
            ]
        }
        ScenarioMetrics::Rag {
            monthly_requests,
            retrieved_pages,
            chunks_used,
            tokens_per_chunk,
            rerank_calls_per_request,
            docs_per_rerank_call,
        } => vec![
            format!("Monthly requests:  {}", format_number(*monthly_requests)),
            format!("Retrieved pages:   {:.1}", retrieved_pages),
            format!("Chunks used:       {}", chunks_used),
            format!("Tokens per chunk:  {}", tokens_per_chunk),
            format!("Rerank calls/req:  {}", rerank_calls_per_request),
            format!("Docs per call:     {}", docs_per_rerank_call),
        ],
    }
}

fn draw_metrics_panel(f: &mut Frame, result: &CalculationResult, area: Rect) {
    let items: Vec<ListItem> = metric_rows(result).into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(list, area);
}
