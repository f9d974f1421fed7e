use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::{info, warn};

use probewatch::data::duration::parse_duration;
use probewatch::ui::{self, Theme};
use probewatch::{
    chart_channel, events, logging, measurement_channel, App, ChartFeeder, Editor, ProbeRunner,
    ProbeScript, ProbeSpec, ProbeTarget, Settings, ShellProbe, Shutdown,
};

/// How long to wait for the sampling tasks after quitting.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "probewatch")]
#[command(about = "Chart the time to first byte of a repeated curl probe")]
struct Args {
    /// Delay between the end of one probe and the start of the next (e.g. "1s", "500ms")
    #[arg(default_value = "1s")]
    interval: String,

    /// Time limit for a single probe (e.g. "3s")
    #[arg(default_value = "3s")]
    max_duration: String,

    /// Domain to probe, or a probe definition file to edit or create
    target: Option<String>,

    /// Settings file (defaults to ./probewatch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the definition file as-is without opening the editor
    #[arg(long)]
    no_edit: bool,

    /// Editor command (overrides $VISUAL and $EDITOR)
    #[arg(long)]
    editor: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let interval = parse_duration(&args.interval)
        .with_context(|| format!("Invalid interval '{}'", args.interval))?;
    let max_duration = parse_duration(&args.max_duration)
        .with_context(|| format!("Invalid max duration '{}'", args.max_duration))?;
    if max_duration.is_zero() {
        bail!("Max duration must be greater than zero");
    }

    let mut settings = Settings::load(args.config.as_deref())?;
    if args.editor.is_some() {
        settings.editor = args.editor;
    }
    if args.log_file.is_some() {
        settings.log_file = args.log_file;
    }
    logging::init(settings.log_file.as_deref(), &settings.log_filter)?;

    let target = ProbeTarget::resolve(args.target.as_deref());
    let editor = (!args.no_edit).then(|| Editor::resolve(settings.editor.as_deref()));
    let spec = target
        .load(editor.as_ref())
        .context("Failed to set up the probe")?;
    info!(command = spec.command(), title = spec.title(), "Probe defined");

    // Removed when dropped, after the runner has stopped
    let script = ProbeScript::write(&spec, max_duration).context("Failed to write probe script")?;

    run_tui(&spec, &script, &settings, interval, max_duration)
}

/// Start sampling and run the chart until the user quits.
fn run_tui(
    spec: &ProbeSpec,
    script: &ProbeScript,
    settings: &Settings,
    interval: Duration,
    max_duration: Duration,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    // Setup terminal before any task runs
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let shutdown = Shutdown::new();
    let (tx, rx) = measurement_channel(settings.channel_capacity);
    let (sink, chart) = chart_channel();

    let probe = ShellProbe::new(script.path(), max_duration).with_shell(settings.shell.as_str());
    let runner = ProbeRunner::new(probe, interval);
    let feeder = ChartFeeder::new(settings.render_cadence(), settings.history_limit);

    let runner_handle = rt.spawn(runner.run(tx, shutdown.signal()));
    let feeder_handle = rt.spawn(feeder.run(rx, sink, shutdown.signal()));

    let mut app = App::new(spec.title(), chart, shutdown)
        .with_timing(interval, max_duration)
        .with_export_path(settings.export_path.clone())
        .with_theme(Theme::auto_detect());

    let result = run_app(&mut terminal, &mut app, settings.redraw_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Covers the error path as well as the quit keys
    app.quit();
    let joined = rt.block_on(async {
        tokio::time::timeout(SHUTDOWN_GRACE, async {
            let cycles = runner_handle.await;
            let series = feeder_handle.await;
            (cycles, series)
        })
        .await
    });
    match joined {
        Ok((Ok(cycles), Ok(series))) => {
            info!(cycles, samples = series.total(), "Sampling stopped cleanly");
        }
        Ok((cycles, series)) => {
            warn!(runner = ?cycles.err(), feeder = ?series.err(), "Sampling task failed");
        }
        Err(_) => warn!(grace = ?SHUTDOWN_GRACE, "Sampling tasks did not stop in time"),
    }
    rt.shutdown_timeout(SHUTDOWN_GRACE);

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    redraw_interval: Duration,
) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        app.refresh();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let height = 5u16.min(area.height);
                let centered =
                    Rect::new(0, area.height.saturating_sub(height) / 2, area.width, height);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(6),    // Chart
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::chart::render(frame, app, chunks[1]);
            ui::common::render_status_bar(frame, app, chunks[2]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Redraws at least once per interval; resizes redraw on the next pass
        if let Some(Event::Key(key)) = events::poll_event(redraw_interval)? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}
