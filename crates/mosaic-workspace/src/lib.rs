// Workspaces: N independent pane arrangements, one live at a time. Switching
// destroys the live panes and recreates the target's from its snapshot.

mod deferred;
mod desk;
mod pane_set;
pub mod session;
pub mod settings;
mod snapshot;
mod store;
mod tests;

pub use deferred::{Deferred, DeferredQueue};
pub use desk::{Desk, SwitchReport};
pub use pane_set::{PaneContent, PaneFactory, PaneRegistry, PaneSet};
pub use session::Session;
pub use settings::{KeybindingOverride, MosaicSettings, NavigationSettings};
pub use snapshot::WorkspaceSnapshot;
pub use store::WorkspaceStore;
