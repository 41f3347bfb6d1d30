use crate::api::request::Request;
use crate::api::session::Session;
use crate::api::transport::Transport;
use crate::service::account::Account;

/// Entry point: a transport plus the session identity it acts for.
pub struct IgClient<T: Transport> {
    transport: T,
    session: Session,
}

impl<T: Transport> IgClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a request against an endpoint path such as `accounts/set_public/`.
    pub fn request(&self, path: impl Into<String>) -> Request<'_, T> {
        Request::new(&self.transport, path)
    }

    /// Profile, privacy and security endpoints.
    pub fn account(&self) -> Account<'_, T> {
        Account::new(self)
    }
}
