use std::{error, fs::File, panic, sync::Mutex};

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEventKind};
use futures::{stream::SelectAll, StreamExt};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tuirealm::terminal::TerminalBridge;
use uplift_faucet::{
    backend::{Backend, Task, WalletTask},
    config::Config,
    ui::{Ui, UiFeedback},
    Event,
};

/// Application result type.
type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let (config, env_file_error) = Config::load(".env")?;

    // Initialize logger, the terminal belongs to the UI
    let log_file = File::create(&config.log_file)?;
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    if let Some(err) = env_file_error {
        tracing::warn!(?err, "failed to load config file");
    }

    // Log panics
    let default_panic_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .unwrap_or(&"unknown");

        let location = panic_info
            .location()
            .unwrap_or_else(|| panic::Location::caller());

        tracing::error!(
            %location,
            "Panic occurred: {}",
            message
        );

        default_panic_hook(panic_info);
    }));

    let backend = Backend::from_config(&config)?;

    let mut terminal = TerminalBridge::new()?;
    terminal.enter_alternate_screen()?;
    terminal.enable_raw_mode()?;

    let result = run(&backend, &mut terminal).await;

    let _ = terminal.leave_alternate_screen();
    let _ = terminal.disable_raw_mode();
    let _ = terminal.clear_screen();

    result
}

async fn run(backend: &Backend, terminal: &mut TerminalBridge) -> AppResult<()> {
    let mut ui = Ui::new(backend.snapshot().await);

    let mut terminal_events = EventStream::new();
    let mut account_changes = backend.account_changes();
    let mut active_tasks = SelectAll::new();

    ui.task_started();
    active_tasks.push(backend.task_events(Task::Wallet(WalletTask::RestoreSession)));

    terminal.raw_mut().draw(|frame| ui.view(frame))?;

    loop {
        let mut redraw = false;

        let event = tokio::select! {
            terminal_event = terminal_events.next() => match terminal_event {
                Some(Ok(TerminalEvent::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                    Some(Event::Key(key_event.into()))
                }
                Some(Ok(TerminalEvent::Resize(_, _))) => {
                    redraw = true;
                    None
                }
                Some(Ok(_)) => None,
                Some(Err(err)) => {
                    tracing::error!(?err, "terminal event error");
                    return Err(err.into());
                }
                None => break,
            },
            Some(backend_event) = active_tasks.next(), if !active_tasks.is_empty() => {
                Some(Event::Backend(backend_event))
            }
            Some(accounts) = account_changes.next() => {
                tracing::info!(?accounts, "wallet accounts changed");
                ui.task_started();
                active_tasks.push(backend.task_events(Task::Wallet(WalletTask::AccountsChanged(accounts))));
                None
            }
        };

        if let Some(event) = event {
            match ui.on_event(event) {
                UiFeedback::Quit => break,
                UiFeedback::ExecuteTask(task) => {
                    tracing::debug!(?task, "executing task");
                    ui.task_started();
                    active_tasks.push(backend.task_events(task));
                    redraw = true;
                }
                UiFeedback::Redraw => redraw = true,
                UiFeedback::None => {}
            }
        }

        if redraw {
            terminal.raw_mut().draw(|frame| ui.view(frame))?;
        }
    }

    Ok(())
}
