use std::sync::Arc;

use flume::{Receiver, Sender};

use ratatui::Frame;

use crate::{
    config::ServiceConfig, event::events::Event, http::ApiService, player::Player,
    session::store::TokenStore, util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::AppState,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub router: Router,
    pub task_manager: TaskManager,
    pub token_store: TokenStore,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let config = ServiceConfig::from_env();
        let token_store = TokenStore::new(config.cache_token);
        let api = Arc::new(ApiService::new(config)?);
        let player = Player::new(event_tx.clone());

        Ok(Self {
            event_rx,
            event_tx: event_tx.clone(),
            ctx: AppContext {
                api,
                player,
                event_tx,
            },
            state: AppState::default(),
            router: Router::new(),
            task_manager: TaskManager::new(),
            token_store,
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        // the startup section key; anything unknown lands on home
        let start_key = std::env::var("MLTUI_START_SECTION").unwrap_or_default();
        let start = crate::ui::state::Section::from_nav_key(&start_key);
        EventHandler::navigate(self, start).await;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            AppLayout::new(self).render(frame);
        }
    }
}
