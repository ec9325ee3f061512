pub mod admin_panel;
pub mod home;
pub mod login;
pub mod playlist_detail;
pub mod playlists;
pub mod register;
pub mod songs;

pub use admin_panel::AdminPanel;
pub use home::Home;
pub use login::Login;
pub use playlist_detail::PlaylistDetail;
pub use playlists::Playlists;
pub use register::Register;
pub use songs::Songs;

use crate::ui::state::Section;
use crate::ui::traits::View;

/// Fresh view for a section. Construction is cheap and context-free; the
/// data load starts in `on_mount`.
pub fn build(section: Section) -> Box<dyn View> {
    match section {
        Section::Home => Box::new(Home),
        Section::Login => Box::new(Login::default()),
        Section::Register => Box::new(Register::default()),
        Section::Songs => Box::new(Songs::default()),
        Section::Playlists => Box::new(Playlists::default()),
        Section::PlaylistDetail => Box::new(PlaylistDetail::default()),
        Section::AdminPanel => Box::new(AdminPanel::default()),
    }
}
