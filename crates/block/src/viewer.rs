//! Who is looking at the dashboard.

use data_loader::UserId;

/// The visitor a block is rendered for.
///
/// Passed in explicitly by the host request handler; nothing here reads
/// session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Not logged in
    Anonymous,
    /// Logged in as the shared guest account
    Guest,
    /// A real, authenticated user
    User(UserId),
}

impl Viewer {
    /// The user to recommend for, if the viewer may see recommendations
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Viewer::User(id) => Some(*id),
            Viewer::Anonymous | Viewer::Guest => None,
        }
    }
}
