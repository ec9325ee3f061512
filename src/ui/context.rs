use crate::{event::events::Event, http::ApiService, player::Player};
use flume::Sender;
use std::sync::Arc;

pub struct AppContext {
    pub api: Arc<ApiService>,
    pub player: Player,
    pub event_tx: Sender<Event>,
}
