//! `msgboard` - Desktop dashboard for browsing logged messages
//!
//! Built with Rust and the iced GUI framework on top of `msgboard-core`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod style;
mod view;

use chrono::NaiveDate;
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::{column, container, row, stack};
use iced::{Element, Length, Subscription, Task};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msgboard_core::{
    ApiClient, Catalog, ClientConfig, Dashboard, DatabaseConfig, DateFormatter, Dialog, Effect,
    Error, FetchTicket, RepairReport,
};

use message::{KeyboardAction, Message};
use style::widgets::{ThemeMode, app_style, palette};

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msgboard=debug,msgboard_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting msgboard");

    let client = match ClientConfig::from_env().and_then(ApiClient::new) {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using API at {}", client.config().base_url);

    iced::application(
        move || Msgboard::new(client.clone()),
        Msgboard::update,
        Msgboard::view,
    )
    .title("Tableau de bord des messages")
    .subscription(Msgboard::subscription)
    .run()
}

/// Main application state.
struct Msgboard {
    /// HTTP client for the message API.
    client: ApiClient,
    /// Everything the screen shows.
    dashboard: Dashboard,
    /// Renders date labels.
    formatter: DateFormatter,
    /// Current theme mode (light/dark).
    theme_mode: ThemeMode,
}

impl Msgboard {
    /// Create new application instance and start the initial load.
    fn new(client: ApiClient) -> (Self, Task<Message>) {
        let mut app = Self {
            client,
            dashboard: Dashboard::default(),
            formatter: DateFormatter::default(),
            theme_mode: ThemeMode::Light,
        };
        palette::set_theme(app.theme_mode);
        let effects = app.dashboard.start();
        let task = app.run(effects);
        (app, task)
    }

    /// Update state based on message.
    #[allow(clippy::needless_pass_by_value)]
    fn update(&mut self, message: Message) -> Task<Message> {
        let effects = match message {
            Message::CatalogLoaded(result) => self.dashboard.catalog_loaded(result),
            Message::RetryConnection => self.dashboard.retry(),
            Message::Reload => self.dashboard.reload(),
            Message::SelectDate(date) => self.dashboard.select_date(date),
            Message::SelectType(kind) => self.dashboard.select_type(kind),
            Message::MessagesLoaded(ticket, result) => {
                self.dashboard.messages_loaded(&ticket, result)
            }
            Message::SeedTestData => self.dashboard.seed(),
            Message::TestDataSeeded(seeded) => self.dashboard.seed_finished(seeded),
            Message::OpenDatabaseConfig => self.dashboard.open_database_config(),
            Message::DatabaseConfigLoaded(result) => self.dashboard.database_config_loaded(result),
            Message::RepairMessages => self.dashboard.repair(),
            Message::MessagesRepaired(result) => self.dashboard.repair_finished(result),
            Message::OpenDatePicker => {
                self.dashboard.open_picker(today());
                Vec::new()
            }
            Message::PickerPrevMonth => {
                self.dashboard.picker_prev();
                Vec::new()
            }
            Message::PickerNextMonth => {
                self.dashboard.picker_next(today());
                Vec::new()
            }
            Message::PickDay(day) => self.dashboard.pick_day(day),
            Message::PickToken(token) => self.dashboard.pick_token(token),
            Message::CloseDialog => {
                self.dashboard.close_dialog();
                Vec::new()
            }
            Message::DismissNotice => {
                self.dashboard.dismiss_notice();
                Vec::new()
            }
            Message::NoticeExpired(id) => {
                self.dashboard.notice_expired(id);
                Vec::new()
            }
            Message::ToggleDebug | Message::KeyPressed(KeyboardAction::ToggleDebug) => {
                self.dashboard.toggle_debug();
                Vec::new()
            }
            Message::ToggleTheme => {
                self.theme_mode = self.theme_mode.toggled();
                palette::set_theme(self.theme_mode);
                Vec::new()
            }
            Message::KeyPressed(KeyboardAction::Reload) => self.dashboard.reload(),
            Message::KeyPressed(KeyboardAction::Escape) => {
                self.dashboard.escape();
                Vec::new()
            }
            Message::Ignored => Vec::new(),
        };
        self.run(effects)
    }

    /// Turns requested effects into tasks.
    fn run(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(
            effects
                .into_iter()
                .map(|effect| perform(self.client.clone(), effect)),
        )
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        let dashboard = &self.dashboard;

        let header = view::view_header(
            dashboard.busy(),
            dashboard.is_loading(),
            dashboard.debug_enabled(),
            self.theme_mode,
        );

        let mut body = column![].spacing(12).padding(16);
        if let Some(banner) = dashboard.banner() {
            body = body.push(view::view_banner(
                &banner,
                self.client.config().base_url.as_str(),
            ));
        }
        body = body
            .push(view::view_date_bar(&dashboard.date_panel(&self.formatter)))
            .push(view::view_type_filter(&dashboard.type_options()));

        let mut main_content =
            row![view::view_message_list(&dashboard.list_panel(&self.formatter))].spacing(12);
        if dashboard.debug_enabled() {
            main_content = main_content.push(view::view_debug_panel(
                &dashboard.debug_snapshot(),
                dashboard.dates(),
                dashboard.types(),
                dashboard.messages(),
            ));
        }
        body = body.push(main_content.height(Length::Fill));

        let mut screen: Element<'_, Message> = container(column![header, body])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(app_style)
            .into();

        if let Some(notice) = dashboard.notice() {
            screen = stack![screen, view::view_notice(notice)].into();
        }

        match dashboard.dialog() {
            Some(Dialog::DatabaseConfig(config)) => {
                view::modal(screen, view::view_database_config(config.as_ref()))
            }
            Some(Dialog::Repair(report)) => view::modal(screen, view::view_repair_report(report)),
            Some(Dialog::DatePicker(_)) => match dashboard.picker(&self.formatter, today()) {
                Some(picker) => view::modal(screen, view::view_date_picker(&picker)),
                None => screen,
            },
            None => screen,
        }
    }

    /// Subscribe to keyboard events for shortcuts.
    #[allow(clippy::unused_self)] // Required signature for iced subscription
    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().map(|event| {
            if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                handle_key_press(&key, modifiers).unwrap_or(Message::Ignored)
            } else {
                Message::Ignored
            }
        })
    }
}

/// Handle keyboard shortcuts and return appropriate message.
fn handle_key_press(key: &Key, modifiers: Modifiers) -> Option<Message> {
    let ctrl = modifiers.command(); // Ctrl on Linux/Windows, Cmd on macOS

    match key {
        // F5: Reload dates and types
        Key::Named(keyboard::key::Named::F5) => Some(Message::KeyPressed(KeyboardAction::Reload)),
        // Escape: Close dialog or notice
        Key::Named(keyboard::key::Named::Escape) => {
            Some(Message::KeyPressed(KeyboardAction::Escape))
        }
        // Ctrl+D: Toggle debug panel
        Key::Character(c) if ctrl && c.as_str() == "d" => {
            Some(Message::KeyPressed(KeyboardAction::ToggleDebug))
        }
        _ => None,
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Maps one effect to the task that carries it out.
fn perform(client: ApiClient, effect: Effect) -> Task<Message> {
    match effect {
        Effect::LoadCatalog => Task::perform(load_catalog(client), Message::CatalogLoaded),
        Effect::FetchMessages(ticket) => {
            Task::perform(fetch_messages(client, ticket), |(ticket, result)| {
                Message::MessagesLoaded(ticket, result)
            })
        }
        Effect::SeedTestData => Task::perform(seed_test_data(client), Message::TestDataSeeded),
        Effect::LoadDatabaseConfig => Task::perform(
            load_database_config(client),
            Message::DatabaseConfigLoaded,
        ),
        Effect::RepairMessages => {
            Task::perform(repair_messages(client), Message::MessagesRepaired)
        }
        Effect::ExpireNotice { id, after } => {
            Task::perform(tokio::time::sleep(after), move |()| Message::NoticeExpired(id))
        }
    }
}

/// Load dates then types.
async fn load_catalog(client: ApiClient) -> Result<Catalog, Error> {
    let catalog = client.load_catalog().await?;
    info!(
        "Loaded {} dates and {} types",
        catalog.dates.len(),
        catalog.types.len()
    );
    Ok(catalog)
}

/// Fetch messages for a ticket's selection.
async fn fetch_messages(
    client: ApiClient,
    ticket: FetchTicket,
) -> (FetchTicket, Result<Vec<msgboard_core::Message>, Error>) {
    let result = client.messages_for(ticket.selection()).await;
    (ticket, result)
}

/// Seed the database with test data.
async fn seed_test_data(client: ApiClient) -> bool {
    client.seed_test_data().await
}

/// Load the database configuration.
async fn load_database_config(client: ApiClient) -> Result<DatabaseConfig, Error> {
    client.database_config().await
}

/// Run the field casing repair.
async fn repair_messages(client: ApiClient) -> Result<RepairReport, Error> {
    client.repair_messages().await
}
